//! Command execution coordinating the integration pipeline.

mod integrate;

use crate::cli::{Args, OutputManager};
use crate::error::Result;

/// Execute the main command based on parsed arguments.
///
/// Every pipeline failure is reported as a user-facing diagnostic and folded
/// into exit code 1; the `Err` branch of the returned `Result` is reserved
/// for failures the caller should treat as fatal.
pub fn execute_command(args: Args) -> Result<i32> {
    if let Err(validation_error) = args.validate() {
        // Validation errors print even in quiet mode
        let output = OutputManager::new(false, false);
        output.error(&format!("Invalid arguments: {validation_error}"));
        return Ok(1);
    }

    let output = OutputManager::new(args.verbose, args.quiet);

    match integrate::execute_integrate(&args, &output) {
        Ok(()) => Ok(0),
        Err(e) => {
            output.error(&e.to_string());

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                let _ = output.println("\nSuggestions:");
                for suggestion in suggestions {
                    let _ = output.indent(&suggestion);
                }
            }

            Ok(1)
        }
    }
}
