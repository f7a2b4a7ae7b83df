//! `deppy go` command

use anyhow::Result;

use crate::cli::GoArgs;
use deppy::ops::run_go;
use deppy::util::process::find_go;
use deppy::util::GlobalContext;

pub fn execute(args: GoArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let go = find_go(ctx.config().go_binary())?;

    let status = run_go(&go, ctx.cwd(), &args.args)?;
    if !status.success() {
        // Signals carry no code
        std::process::exit(status.code().unwrap_or(1));
    }

    Ok(())
}
