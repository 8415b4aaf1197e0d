#![allow(unused_imports)]

use slate_tui::{
    apply_letter_case, resolve_origin, resolve_size, ActiveElement, ActiveState, Capability,
    CapabilityTable, Cell, CellStyle, Chart, ChartAppearance, Color, Component, Console,
    DiffRenderer, EnvConfig, FrameLimiter, Grid, Group, HeadlessTerminal, InputAppearance,
    InputDecoder, InputKeys, InputText, Key, KeyEvent, LayoutPolicy, Modifiers, NavigationGroup,
    Orientation, Palette, Position, ProcessTerminal, Rect, Resolution, Result, ScrollConfig,
    ScrollKeys, ScrollMode, ScrollModel, ScrollPart, ScrollRender, Scrollbar, ScrollbarAppearance,
    Shared, SizeSpec, Surface, TerminalBackend, Text, TextAppearance, TextLayout, TuiError, Vec2,
};

#[test]
fn public_api_exports_compile() {}
