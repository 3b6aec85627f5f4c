use crate::utils::Rgba8;

#[derive(Clone, Debug, PartialEq)]
pub struct ChartTheme {
    pub background: Rgba8,
    pub grid_line: Rgba8,
    pub axis_label: Rgba8,
    pub value_label: Rgba8,
    pub selection_fill: Rgba8,
    pub selection_stroke: Rgba8,
    pub button_background: Rgba8,
    pub button_border: Rgba8,
    pub border: Rgba8,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: Rgba8::WHITE,
            grid_line: Rgba8::rgb(0xef, 0xef, 0xef),
            axis_label: Rgba8::rgb(0x66, 0x66, 0x66),
            value_label: Rgba8::rgb(0x33, 0x33, 0x33),
            selection_fill: Rgba8::rgba(0x00, 0x7b, 0xff, 0x33),
            selection_stroke: Rgba8::rgb(0x00, 0x7b, 0xff),
            button_background: Rgba8::rgba(0xff, 0xff, 0xff, 0xcc),
            button_border: Rgba8::rgb(0xcc, 0xcc, 0xcc),
            border: Rgba8::rgb(0xdd, 0xdd, 0xdd),
        }
    }
}
