//! Layout of the coordinate numbers drawn in the grid margin.

/// Character size the frontend should use for axis labels.
pub const LABEL_FONT_SIZE: u32 = 16;

/// A number to draw at pixel position `(x, y)` with a character size of `size`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AxisLabel {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub size: u32,
}

/// Row numbers down the left margin followed by column numbers along the top margin. Index 0 is
/// the corner shared by both margins and stays blank.
pub fn axis_labels(columns: usize, rows: usize, cell_size: i32) -> Vec<AxisLabel> {
    let row_labels = (1..rows as i32).map(|i| AxisLabel {
        text: i.to_string(),
        x: 10,
        y: i * cell_size + 5,
        size: LABEL_FONT_SIZE,
    });
    let column_labels = (1..columns as i32).map(|i| AxisLabel {
        text: i.to_string(),
        x: i * cell_size + 8,
        y: 10,
        size: LABEL_FONT_SIZE,
    });
    row_labels.chain(column_labels).collect()
}
