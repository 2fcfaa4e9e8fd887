use gpui::*;

actions!(
    stream_dashboard,
    [
        ToggleStreaming,
        GrowDataset,
        ShrinkDataset,
        ResetDataset,
        ZoomIn,
        ZoomOut,
        ResetView,
    ]
);

/// Registers the dashboard key bindings.
pub fn init(cx: &mut App) {
    cx.bind_keys([
        KeyBinding::new("space", ToggleStreaming, None),
        KeyBinding::new("g", GrowDataset, None),
        KeyBinding::new("s", ShrinkDataset, None),
        KeyBinding::new("r", ResetDataset, None),
        KeyBinding::new("+", ZoomIn, None),
        KeyBinding::new("=", ZoomIn, None),
        KeyBinding::new("-", ZoomOut, None),
        KeyBinding::new("0", ResetView, None),
    ]);
}
