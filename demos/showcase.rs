//! Interactive tour of the widgets.
//!
//! Tab and Shift+Tab move focus, arrows scroll or move the caret, Esc quits.
//! Set `SLATE_TUI_LOG=/tmp/slate.log` to capture debug output.

use slate_tui::{
    logging, ActiveElement, Chart, Component, Console, EnvConfig, InputText, Key,
    NavigationGroup, Position, ProcessTerminal, SizeSpec, Text, Vec2,
};

const ARTICLE: &str = "Surfaces are rectangular cell buffers. Each one is sized relative \
to its parent and anchored at a point it shares with that parent, so layouts follow \
the terminal as it is resized.\n\nTransparent cells let whatever is below show through, \
which is how the focus caret, the scrollbars and this paragraph are layered.\n\n\
Use the arrow keys while this text is focused to scroll it.";

fn header() -> Text {
    let mut header = Text::new(SizeSpec::new(Vec2::new(0, 1), Vec2::new(100, 0)))
        .with_str("Tab: next  Shift+Tab: previous  Arrows: scroll/move  Esc: quit");
    header.use_scroll(false);
    header
}

fn form() -> NavigationGroup {
    let body = SizeSpec::new(Vec2::new(0, -1), Vec2::new(100, 100));

    let article = Text::new(SizeSpec::percent(50, 60)).with_str(ARTICLE);

    let mut name = InputText::new(SizeSpec::new(Vec2::new(-1, 3), Vec2::new(50, 0)));
    name.surface_mut().set_position(Position::TOP_RIGHT);
    name.set_value("type here");

    let mut secret = InputText::new(SizeSpec::new(Vec2::new(-1, 1), Vec2::new(50, 0)));
    secret
        .surface_mut()
        .set_position(Position::TOP_RIGHT.with_offset(0, 4));
    secret.use_confidential_mode(true);

    let mut group = NavigationGroup::new(body);
    group
        .surface_mut()
        .set_position(Position::TOP_LEFT.with_offset(0, 1));
    group.push(Box::new(article));
    group.push(Box::new(name));
    group.push(Box::new(secret));
    group.push(Box::new(chart()));
    group
}

fn chart() -> Chart {
    let mut chart = Chart::new(SizeSpec::percent(100, 40));
    chart.surface_mut().set_position(Position::BOTTOM_LEFT);
    chart.set_values(
        (0..120)
            .map(|step| (f64::from(step) / 7.0).sin() * 8.0 + (f64::from(step) / 23.0).cos() * 3.0)
            .collect(),
    );
    chart
}

fn main() -> slate_tui::Result<()> {
    let config = EnvConfig::from_env();
    logging::init(&config)?;

    let mut console = Console::new(ProcessTerminal::new()?, &config)?;
    console.set_title("slate_tui showcase")?;

    let mut header = header();
    let mut form = form();
    form.activate();

    loop {
        for key in console.poll_input()? {
            if key.key == Key::Escape {
                tracing::info!("showcase exiting");
                return Ok(());
            }
            form.handle_key(&key);
        }

        console.clear()?;
        console.draw(&mut header);
        console.draw(&mut form);
        console.display()?;
    }
}
