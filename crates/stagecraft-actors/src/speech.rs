//! Speech bubbles as a composable capability

use crate::text::Text;
use stagecraft_core::{Capability, Ctx, Delay, Error, Property, Result, Task, Value};

/// Font size of speech bubbles
const MAGNITUDE: f64 = 15.0;
/// Gap between the speaker's top edge and the bubble
const GAP: f64 = 10.0;

/// Lets any actor say things
///
/// `say(message)` spawns a [`Text`] above the speaker and removes it after
/// the speech duration. The initializer takes an optional duration in
/// seconds (default 2).
#[derive(Debug, Clone, PartialEq)]
pub struct Speech {
    duration: f64,
    said: usize,
}

impl Default for Speech {
    fn default() -> Self {
        Self {
            duration: 2.0,
            said: 0,
        }
    }
}

impl Speech {
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// How many messages this actor has said
    pub fn said(&self) -> usize {
        self.said
    }
}

impl Capability for Speech {
    fn name(&self) -> &str {
        "Speech"
    }

    fn methods(&self) -> &[&'static str] {
        &["say"]
    }

    fn init(&mut self, _ctx: &mut Ctx<'_>, args: &[Value]) -> Result<()> {
        if let Some(arg) = args.first() {
            let duration = arg
                .as_float()
                .ok_or_else(|| Error::type_error("float", arg))?;
            if !(duration > 0.0) {
                return Err(Error::InvalidArgument(format!(
                    "speech duration must be positive, got {}",
                    duration
                )));
            }
            self.duration = duration;
        }
        Ok(())
    }

    fn call(&mut self, _method: &str, ctx: &mut Ctx<'_>, args: &[Value]) -> Result<Value> {
        let message = Value::str_arg(args, 0)?;

        let x = ctx.get(Property::X);
        let y = ctx.get(Property::Y);
        let half_height = ctx.sprite().size().1 * ctx.get(Property::Scale) / 2.0;
        let bubble = ctx.spawn(Text::builder(message, MAGNITUDE).at(x, y + half_height + GAP));
        ctx.schedule(Delay::seconds(self.duration), Task::kill(bubble));

        self.said += 1;
        log::info!("{} says {:?}", ctx.id(), message);
        Ok(Value::Actor(bubble))
    }
}
