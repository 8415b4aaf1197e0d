use slate_tui::{
    ActiveElement, Component, Console, EnvConfig, HeadlessTerminal, InputText, NavigationGroup,
    Position, SizeSpec, Text,
};

fn console(columns: i32, rows: i32) -> Console<HeadlessTerminal> {
    let config = EnvConfig {
        fps_limit: 0,
        escape_timeout_ms: 0,
        ..EnvConfig::default()
    };
    Console::new(HeadlessTerminal::new(columns, rows), &config).expect("console")
}

/// Feed `bytes` through the console and route every decoded key.
fn pump(
    console: &mut Console<HeadlessTerminal>,
    root: &mut dyn Component,
    bytes: &[u8],
) -> Vec<bool> {
    console.backend_mut().push_input(bytes.to_vec());
    let keys = console.poll_input().expect("poll");
    keys.iter().map(|key| root.handle_key(key)).collect()
}

fn frame(console: &mut Console<HeadlessTerminal>, root: &mut dyn Component) -> Vec<String> {
    console.clear().expect("clear");
    console.draw(root);
    console.display().expect("display");
    console.backend().screen()
}

fn form() -> NavigationGroup {
    let mut log = Text::new(SizeSpec::fixed(12, 1)).with_str("one\ntwo\nthree");
    log.use_scroll(false);

    let mut field = InputText::new(SizeSpec::fixed(12, 1));
    field.surface_mut().set_position(Position::BOTTOM_LEFT);
    field.set_blink_period(None);

    NavigationGroup::default()
        .with_element(Box::new(log))
        .with_element(Box::new(field))
}

#[test]
fn keys_reach_the_focused_widget_through_the_frame() {
    let mut console = console(12, 3);
    let mut form = form();
    form.activate();
    assert_eq!(form.selected(), Some(0));

    assert_eq!(pump(&mut console, &mut form, b"\x1b[B"), vec![true]);
    assert_eq!(
        frame(&mut console, &mut form),
        vec!["two         ", "            ", "            "]
    );

    assert_eq!(pump(&mut console, &mut form, b"\thi"), vec![true, true, true]);
    assert_eq!(form.selected(), Some(1));
    assert_eq!(
        frame(&mut console, &mut form),
        vec!["two         ", "            ", "hi_         "]
    );

    assert_eq!(
        pump(&mut console, &mut form, b"\x1b"),
        vec![false],
        "escape is left to the application"
    );

    assert_eq!(pump(&mut console, &mut form, b"\x1b[Z"), vec![true]);
    assert_eq!(form.selected(), Some(0));
    assert_eq!(
        frame(&mut console, &mut form)[2],
        "hi          ",
        "caret disappears with focus"
    );
}

#[test]
fn inactive_form_swallows_nothing() {
    let mut console = console(12, 3);
    let mut form = form();
    assert_eq!(pump(&mut console, &mut form, b"\tx"), vec![false, false]);
    assert_eq!(form.selected(), None);
}

#[test]
fn terminal_resize_reflows_filling_text() {
    let mut console = console(6, 2);
    let mut text = Text::default().with_str("abc def ghi");
    assert_eq!(frame(&mut console, &mut text), vec!["abc d-", "ef ghi"]);

    console.backend_mut().resize(12, 2);
    assert_eq!(
        frame(&mut console, &mut text),
        vec!["abc def ghi ", "            "]
    );
    assert!(console.was_resized());
    assert_eq!(console.backend().frames().len(), 2);
}
