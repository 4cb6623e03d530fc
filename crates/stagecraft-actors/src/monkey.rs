//! The monkey face: the stock example actor

use stagecraft_core::{ActorBuilder, Capability, Ctx, Delay, Error, Result, Value};

pub const NORMAL_IMAGE: &str = "monkey_normal.png";
pub const SMILE_IMAGE: &str = "monkey_smile.png";
pub const SHOUT_IMAGE: &str = "monkey_shout.png";

/// Expression currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mood {
    #[default]
    Normal,
    Smiling,
    Shouting,
}

impl Mood {
    pub fn image(self) -> &'static str {
        match self {
            Mood::Normal => NORMAL_IMAGE,
            Mood::Smiling => SMILE_IMAGE,
            Mood::Shouting => SHOUT_IMAGE,
        }
    }
}

/// A brown monkey face that can smile and shout
///
/// Both expressions last one second, after which the monkey goes back to its
/// normal face.
#[derive(Debug, Default)]
pub struct Monkey {
    mood: Mood,
}

impl Monkey {
    /// Size of the stock monkey images
    pub const SIZE: (f64, f64) = (128.0, 128.0);

    /// Builder for a monkey at the stage origin
    pub fn builder() -> ActorBuilder {
        ActorBuilder::new(Monkey::default())
            .size(Self::SIZE.0, Self::SIZE.1)
            .image(NORMAL_IMAGE)
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    fn show(&mut self, ctx: &mut Ctx<'_>, mood: Mood) {
        self.mood = mood;
        ctx.sprite_mut().set_image(Some(mood.image().to_string()));
    }
}

impl Capability for Monkey {
    fn name(&self) -> &str {
        "Monkey"
    }

    fn methods(&self) -> &[&'static str] {
        &["smile", "shout", "normal"]
    }

    fn init(&mut self, ctx: &mut Ctx<'_>, _args: &[Value]) -> Result<()> {
        self.show(ctx, Mood::Normal);
        Ok(())
    }

    fn call(&mut self, method: &str, ctx: &mut Ctx<'_>, _args: &[Value]) -> Result<Value> {
        let mood = match method {
            "smile" => Mood::Smiling,
            "shout" => Mood::Shouting,
            "normal" => Mood::Normal,
            _ => {
                return Err(Error::UnknownMethod {
                    actor: ctx.id(),
                    method: method.to_string(),
                })
            }
        };

        self.show(ctx, mood);
        if mood != Mood::Normal {
            ctx.after(Delay::seconds(1.0), "normal", Vec::new());
        }
        Ok(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagecraft_core::{Stage, StageConfig, TaskScheduler};

    fn image(stage: &Stage, id: stagecraft_core::ActorId) -> Option<String> {
        stage
            .actor(id)
            .unwrap()
            .sprite()
            .image()
            .map(str::to_string)
    }

    #[test]
    fn test_spawns_with_normal_face_at_origin() {
        let mut stage = Stage::new(StageConfig::default());
        let id = stage.spawn(Monkey::builder()).unwrap();

        let actor = stage.actor(id).unwrap();
        assert_eq!(actor.sprite().position(), (320.0, 240.0));
        assert_eq!(actor.sprite().center(), (64.0, 64.0));
        assert_eq!(actor.capability::<Monkey>().unwrap().mood(), Mood::Normal);
        assert_eq!(image(&stage, id).as_deref(), Some(NORMAL_IMAGE));
    }

    #[test]
    fn test_smile_reverts_after_one_second() {
        let mut stage = Stage::new(StageConfig::default().with_frames_per_second(4));
        let id = stage.spawn(Monkey::builder()).unwrap();

        stage.invoke(id, "smile", &[]).unwrap();
        assert_eq!(image(&stage, id).as_deref(), Some(SMILE_IMAGE));

        for _ in 0..3 {
            stage.tick();
        }
        assert_eq!(image(&stage, id).as_deref(), Some(SMILE_IMAGE));

        stage.tick();
        assert_eq!(image(&stage, id).as_deref(), Some(NORMAL_IMAGE));
        let monkey = stage.actor(id).unwrap().capability::<Monkey>().unwrap();
        assert_eq!(monkey.mood(), Mood::Normal);
    }

    #[test]
    fn test_shout_then_kill_cancels_revert() {
        let mut stage = Stage::new(StageConfig::default());
        let id = stage.spawn(Monkey::builder()).unwrap();
        stage.invoke(id, "shout", &[]).unwrap();
        assert_eq!(stage.tasks().pending(), 1);

        stage.kill(id).unwrap();
        assert_eq!(stage.tasks().pending(), 0);
    }

    #[test]
    fn test_grows_with_tween() {
        let mut stage = Stage::new(StageConfig::default().with_frames_per_second(10));
        let id = stage.spawn(Monkey::builder()).unwrap();
        stage
            .set(
                id,
                stagecraft_core::Property::Scale,
                stagecraft_tween::interpolate(1.0, 2.0, 0.5),
            )
            .unwrap();

        for _ in 0..5 {
            stage.tick();
        }
        assert_eq!(stage.get(id, stagecraft_core::Property::Scale).unwrap(), 2.0);
        assert_eq!(stage.actor(id).unwrap().sprite().scale(), (2.0, 2.0));
    }
}
