//! `deppy save` command

use anyhow::Result;

use crate::cli::SaveArgs;
use crate::GlobalOptions;
use deppy::ops::{save, SaveOptions};
use deppy::util::fs::relative_path;
use deppy::util::{GlobalContext, Status};

pub fn execute(args: SaveArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let ctx = GlobalContext::new()?;

    if args.copy {
        shell.warn("flag --copy is deprecated: sources are always copied");
    }

    let opts = SaveOptions {
        packages: args.packages,
        rewrite: args.rewrite.unwrap_or(ctx.config().rewrite_by_default()),
    };

    let loader = ctx.package_loader()?;

    let spinner = shell.spinner("Resolving dependencies...");
    let result = save(ctx.cwd(), &loader, &opts);
    spinner.finish_and_clear();
    let report = result?;

    for dep in &report.removed {
        shell.status(Status::Removed, &dep.import_path);
    }
    if report.rewritten > 0 {
        let noun = if report.rewritten == 1 { "file" } else { "files" };
        shell.status(Status::Rewrote, format!("{} {}", report.rewritten, noun));
    }

    let count = report.manifest.deps.len();
    let manifest_path = relative_path(ctx.cwd(), &report.manifest_path);
    let noun = if count == 1 { "dependency" } else { "dependencies" };
    shell.status(
        Status::Saved,
        format!("{} {} to {}", count, noun, manifest_path.display()),
    );

    Ok(())
}
