pub mod batch;
pub mod config_env;
pub mod json_api;

pub use batch::{
    derive_game_seed, find_true_report, game_id, generate_batch, read_jsonl, read_jsonl_file,
    write_batch, write_jsonl, BatchRequest, GeneratedGame, EXAMPLES_FILE, JSONL_FILE,
    TRUE_REPORT_FILE,
};
pub use config_env::{ConfigOverrides, CONFIG_PATH_ENV};
pub use json_api::{generate_game_json, generate_game_json_with, GenerateRequest, GenerateResponse};
