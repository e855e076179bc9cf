// spritegen-cli/src/error.rs
//
// CLI error handling: the CLI surfaces the core error type directly, so its
// result alias exists only for consistency with spritegen-core.

use spritegen_core::CoreResult;

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;
