//! Text labels

use stagecraft_core::{ActorBuilder, Capability, Ctx, Error, Result, Value};

/// RGBA color, 0-255 per channel
pub type Color = [u8; 4];

pub const BLACK: Color = [0, 0, 0, 255];

/// Default font size
pub const MAGNITUDE: f64 = 30.0;

/// A line of text on screen
///
/// Initializer arguments: optional text, then optional magnitude. Methods:
/// `text`, `set_text`, `color`, `set_color`, `magnitude`.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    text: String,
    color: Color,
    magnitude: f64,
}

impl Default for Text {
    fn default() -> Self {
        Self {
            text: String::new(),
            color: BLACK,
            magnitude: MAGNITUDE,
        }
    }
}

impl Text {
    /// Builder for a label showing `text` at `magnitude`
    ///
    /// The pivot is centered on an estimate of the rendered size: half the
    /// magnitude per character wide, one magnitude high.
    pub fn builder(text: impl Into<String>, magnitude: f64) -> ActorBuilder {
        let text = text.into();
        let width = text.chars().count() as f64 * magnitude * 0.5;
        ActorBuilder::new(Text::default())
            .size(width, magnitude)
            .arg(text)
            .arg(magnitude)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }
}

fn parse_color(value: &Value) -> Result<Color> {
    let items = value
        .as_list()
        .ok_or_else(|| Error::type_error("list", value))?;
    if !(3..=4).contains(&items.len()) {
        return Err(Error::InvalidArgument(format!(
            "a color needs 3 or 4 channels, got {}",
            items.len()
        )));
    }

    let mut color = BLACK;
    for (slot, item) in color.iter_mut().zip(items) {
        let channel = item.as_int().ok_or_else(|| Error::type_error("int", item))?;
        *slot = u8::try_from(channel).map_err(|_| {
            Error::InvalidArgument(format!("color channel {} out of range", channel))
        })?;
    }
    Ok(color)
}

impl Capability for Text {
    fn name(&self) -> &str {
        "Text"
    }

    fn methods(&self) -> &[&'static str] {
        &["text", "set_text", "color", "set_color", "magnitude"]
    }

    fn init(&mut self, _ctx: &mut Ctx<'_>, args: &[Value]) -> Result<()> {
        if !args.is_empty() {
            self.text = Value::str_arg(args, 0)?.to_string();
        }
        if args.len() > 1 {
            let magnitude = Value::float_arg(args, 1)?;
            if !(magnitude > 0.0) {
                return Err(Error::InvalidArgument(format!(
                    "text magnitude must be positive, got {}",
                    magnitude
                )));
            }
            self.magnitude = magnitude;
        }
        Ok(())
    }

    fn call(&mut self, method: &str, ctx: &mut Ctx<'_>, args: &[Value]) -> Result<Value> {
        match method {
            "text" => Ok(Value::from(self.text.as_str())),
            "set_text" => {
                self.text = Value::str_arg(args, 0)?.to_string();
                Ok(Value::Null)
            }
            "color" => Ok(Value::from(
                self.color.iter().map(|c| i64::from(*c)).collect::<Vec<_>>(),
            )),
            "set_color" => {
                let value = args
                    .first()
                    .ok_or_else(|| Error::InvalidArgument("set_color needs a color".into()))?;
                self.color = parse_color(value)?;
                Ok(Value::Null)
            }
            "magnitude" => Ok(Value::from(self.magnitude)),
            _ => Err(Error::UnknownMethod {
                actor: ctx.id(),
                method: method.to_string(),
            }),
        }
    }
}
