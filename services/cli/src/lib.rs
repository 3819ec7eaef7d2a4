mod cli;
mod pipeline;

use claim_triage::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
