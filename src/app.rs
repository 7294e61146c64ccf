use color_eyre::Result;
use eyre::Context as _;
use haproxy_status_config::{
    Args,
    Config,
};
use haproxy_status_stats::{
    render,
    status,
};

pub struct App {
    args: Args,
}

impl App {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    /// Fetches one snapshot and writes it out.
    pub fn run(self) -> Result<()> {
        if self.args.version {
            println!("{}", crate::version());
            return Ok(());
        }

        let config = Config::new(&self.args).context("Failed to load configuration")?;
        let records = status(&config)?;
        let output = render(&records, config.format)?;

        match &self.args.output_file {
            Some(path) => {
                std::fs::write(path, format!("{output}\n"))
                    .wrap_err_with(|| format!("Failed to write stats to {}", path.display()))?;
                info!(path = %path.display(), records = records.len(), "Stats exported");
            }
            None => println!("{output}"),
        }

        Ok(())
    }
}
