//! Browser page bindings
//!
//! Looks up the stage elements once and applies board views, status messages
//! and the answer value to them.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement};

use crate::config::PuzzleConfig;
use crate::error::ConfigError;
use crate::view::{BoardView, StatusMessage};

pub const BOARD_ID: &str = "grid-board";
pub const RED_BUTTON_ID: &str = "btn-red";
pub const BLUE_BUTTON_ID: &str = "btn-blue";
pub const START_BUTTON_ID: &str = "btn-start";
pub const ANSWER_INPUT_ID: &str = "answer-input";

/// Global holding the server-provided puzzle
pub const CONFIG_GLOBAL: &str = "stage4Config";

impl From<JsValue> for ConfigError {
    fn from(value: JsValue) -> Self {
        ConfigError::Host(format!("{:?}", value))
    }
}

/// Stage elements
pub struct Page {
    document: Document,
    board: HtmlElement,
    pub red_button: HtmlElement,
    pub blue_button: HtmlElement,
    pub start_button: HtmlButtonElement,
    /// Optional: the page may omit the answer form
    answer_input: Option<HtmlInputElement>,
}

impl Page {
    /// Find every required element, failing on the first one missing
    pub fn bind() -> Result<Self, ConfigError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(ConfigError::Host("no document".to_string()))?;

        let board = element::<HtmlElement>(&document, BOARD_ID)?;
        let red_button = element::<HtmlElement>(&document, RED_BUTTON_ID)?;
        let blue_button = element::<HtmlElement>(&document, BLUE_BUTTON_ID)?;
        let start_button = element::<HtmlButtonElement>(&document, START_BUTTON_ID)?;
        let answer_input = document
            .get_element_by_id(ANSWER_INPUT_ID)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
        if answer_input.is_none() {
            log::warn!("No #{} on page, outcome will not be written", ANSWER_INPUT_ID);
        }

        Ok(Self {
            document,
            board,
            red_button,
            blue_button,
            start_button,
            answer_input,
        })
    }

    /// Rebuild the board tiles
    pub fn render_board(&self, view: &BoardView, tile_size_px: u32) -> Result<(), ConfigError> {
        self.board
            .style()
            .set_property("grid-template-columns", &view.grid_template_columns(tile_size_px))?;
        self.board.set_inner_html("");

        for tile in &view.tiles {
            let el = self.document.create_element("div")?;
            el.set_class_name(&tile.css_classes().join(" "));
            el.set_attribute("data-r", &tile.pos.row.to_string())?;
            el.set_attribute("data-c", &tile.pos.col.to_string())?;
            if let Some(label) = tile.class.label() {
                el.set_text_content(Some(label));
            }
            if tile.has_ball {
                let ball = self.document.create_element("div")?;
                ball.set_class_name("ball");
                el.append_child(&ball)?;
            }
            self.board.append_child(&el)?;
        }
        Ok(())
    }

    /// Show a message in the page alert, creating it if absent
    pub fn show_status(&self, message: &StatusMessage) -> Result<(), ConfigError> {
        let alert = match self.document.query_selector(".alert")? {
            Some(el) => el,
            None => self.create_alert()?,
        };
        alert.set_text_content(Some(&message.text));
        alert.set_class_name(&message.class_name());
        set_display(&alert, "block")
    }

    pub fn hide_status(&self) -> Result<(), ConfigError> {
        if let Some(alert) = self.document.query_selector(".alert")? {
            set_display(&alert, "none")?;
        }
        Ok(())
    }

    pub fn write_outcome(&self, value: &str) {
        if let Some(input) = &self.answer_input {
            input.set_value(value);
        }
    }

    pub fn set_start_enabled(&self, enabled: bool) {
        self.start_button.set_disabled(!enabled);
    }

    /// Alert goes right after the first `hr`, else at the top of `.container`
    fn create_alert(&self) -> Result<Element, ConfigError> {
        let alert = self.document.create_element("div")?;
        alert.set_class_name("alert");
        if let Some(hr) = self.document.query_selector("hr")? {
            hr.after_with_node_1(&alert)?;
        } else if let Some(container) = self.document.query_selector(".container")? {
            container.prepend_with_node_1(&alert)?;
        } else {
            log::warn!("No place for the status message on this page");
        }
        Ok(alert)
    }
}

/// Read the puzzle the server embedded as `window.stage4Config`
pub fn load_puzzle_config() -> Result<PuzzleConfig, ConfigError> {
    let window = web_sys::window().ok_or(ConfigError::Host("no window".to_string()))?;
    let value = js_sys::Reflect::get(&window, &CONFIG_GLOBAL.into())?;
    if value.is_undefined() || value.is_null() {
        return Err(ConfigError::MissingConfig(CONFIG_GLOBAL));
    }
    let json = js_sys::JSON::stringify(&value)?
        .as_string()
        .ok_or(ConfigError::MissingConfig(CONFIG_GLOBAL))?;
    PuzzleConfig::from_json(&json)
}

fn element<T: JsCast>(document: &Document, id: &'static str) -> Result<T, ConfigError> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
        .ok_or(ConfigError::MissingElement(id))
}

fn set_display(el: &Element, display: &str) -> Result<(), ConfigError> {
    if let Some(el) = el.dyn_ref::<HtmlElement>() {
        el.style().set_property("display", display)?;
    }
    Ok(())
}
