use clap::Parser;
use color_eyre::Result;
use haproxy_status::{
    init_errors,
    init_logging,
    App,
};
use haproxy_status_config::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    init_errors()?;
    init_logging(args.verbose)?;
    App::new(args).run()
}
