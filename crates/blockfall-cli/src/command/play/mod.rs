use crate::{command::SessionArg, tui::Runtime};

use self::app::PlayApp;

mod app;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    session: SessionArg,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { session } = arg;

    let (engine, seed) = session.start()?;
    let mut app = PlayApp::new(engine);
    Runtime::new().run(&mut app)?;

    let stats = app.engine().stats();
    eprintln!(
        "Final score {} ({} lines, {} pieces) with seed {seed}",
        stats.score(),
        stats.total_cleared_lines(),
        stats.completed_pieces(),
    );
    Ok(())
}
