//! Region-map hover state and its tooltip.

#[cfg(test)]
#[path = "hover_test.rs"]
mod hover_test;

/// Tooltip offset from the cursor, in CSS pixels.
pub const TOOLTIP_OFFSET: i32 = 10;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tooltip {
    pub visible: bool,
    pub text: String,
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverState {
    /// Region under the cursor.
    pub region: Option<String>,
    pub tooltip: Tooltip,
}

impl HoverState {
    pub fn show(&mut self, name: &str, client_x: i32, client_y: i32) {
        self.region = Some(name.to_owned());
        self.tooltip.text = name.to_owned();
        self.tooltip.visible = true;
        self.update_position(client_x, client_y);
    }

    pub fn hide(&mut self) {
        self.region = None;
        self.tooltip.visible = false;
    }

    pub fn update_position(&mut self, client_x: i32, client_y: i32) {
        self.tooltip.x = client_x + TOOLTIP_OFFSET;
        self.tooltip.y = client_y + TOOLTIP_OFFSET;
    }
}
