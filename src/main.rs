use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = publink::cli::parse();
    app::run(args)
}
