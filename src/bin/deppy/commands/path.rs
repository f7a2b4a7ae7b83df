//! `deppy path` command
//!
//! Prints the vendor workspace so it can be spliced into GOPATH.

use anyhow::Result;

use deppy::ops::workspace_path;
use deppy::util::GlobalContext;

pub fn execute() -> Result<()> {
    let ctx = GlobalContext::new()?;
    println!("{}", workspace_path(ctx.cwd())?.display());
    Ok(())
}
