//! # photostat CLI
//!
//! Command-line interface for the photo statistics collector.
//!
//! ## Usage
//! ```bash
//! photostat scan ~/Photos
//! photostat scan ~/Photos --images --save --output stats.txt
//! photostat config show
//! ```

mod cli;

use photo_stat::Result;

fn main() -> Result<()> {
    cli::run()
}
