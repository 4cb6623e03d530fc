//! Thrown bananas

use stagecraft_core::{ActorBuilder, Capability, Ctx, Error, Property, Result, Value, UPDATE};

pub const IMAGE: &str = "banana.png";

/// Vertical velocity a banana starts with
const LIFT: f64 = 3.0;
/// Vertical velocity lost every frame
const GRAVITY: f64 = 0.1;
/// Degrees of spin per frame
const SPIN: f64 = 10.0;

/// A spinning banana under gravity
///
/// `launch(angle_degrees, force)` sets its velocity; every frame it spins,
/// moves by its velocity and loses some upward speed. The vertical axis
/// points up.
#[derive(Debug, Clone, PartialEq)]
pub struct Banana {
    dx: f64,
    dy: f64,
    vel_y: f64,
}

impl Default for Banana {
    fn default() -> Self {
        Self {
            dx: 0.0,
            dy: 0.0,
            vel_y: LIFT,
        }
    }
}

impl Banana {
    /// Size of the stock banana image
    pub const SIZE: (f64, f64) = (64.0, 64.0);

    /// Builder for a banana at `(x, y)`
    pub fn builder(x: f64, y: f64) -> ActorBuilder {
        ActorBuilder::new(Banana::default())
            .size(Self::SIZE.0, Self::SIZE.1)
            .image(IMAGE)
            .at(x, y)
    }

    /// Aim the banana
    pub fn launch(&mut self, angle_degrees: f64, force: f64) {
        let angle = angle_degrees.to_radians();
        self.dx = angle.cos() * force;
        self.dy = angle.sin() * force;
    }

    /// Velocity applied on the next frame
    pub fn velocity(&self) -> (f64, f64) {
        (self.dx, self.dy + self.vel_y)
    }

    fn step(&mut self, ctx: &mut Ctx<'_>) {
        let rotation = ctx.get(Property::Rotation);
        let (x, y) = (ctx.get(Property::X), ctx.get(Property::Y));
        ctx.set(Property::Rotation, rotation + SPIN);
        ctx.set(Property::X, x + self.dx);
        ctx.set(Property::Y, y + self.dy + self.vel_y);
        self.vel_y -= GRAVITY;
    }
}

impl Capability for Banana {
    fn name(&self) -> &str {
        "Banana"
    }

    fn methods(&self) -> &[&'static str] {
        &[UPDATE, "launch"]
    }

    fn init(&mut self, ctx: &mut Ctx<'_>, _args: &[Value]) -> Result<()> {
        ctx.set(Property::Scale, 0.5);
        Ok(())
    }

    fn call(&mut self, method: &str, ctx: &mut Ctx<'_>, args: &[Value]) -> Result<Value> {
        match method {
            UPDATE => {
                self.step(ctx);
                Ok(Value::Null)
            }
            "launch" => {
                let angle = Value::float_arg(args, 0)?;
                let force = Value::float_arg(args, 1)?;
                self.launch(angle, force);
                Ok(Value::Null)
            }
            _ => Err(Error::UnknownMethod {
                actor: ctx.id(),
                method: method.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagecraft_core::{Stage, StageConfig};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_launch_components() {
        let mut banana = Banana::default();
        banana.launch(90.0, 2.0);
        let (vx, vy) = banana.velocity();
        assert!(close(vx, 0.0));
        assert!(close(vy, 5.0));
    }

    #[test]
    fn test_flight_on_stage() {
        let mut stage = Stage::new(StageConfig::default());
        let id = stage.spawn(Banana::builder(100.0, 100.0)).unwrap();
        assert_eq!(stage.get(id, Property::Scale).unwrap(), 0.5);

        stage
            .invoke(id, "launch", &[Value::from(0.0), Value::from(3.0)])
            .unwrap();
        stage.tick();
        stage.tick();

        // y: +3.0 then +2.9
        assert!(close(stage.get(id, Property::X).unwrap(), 106.0));
        assert!(close(stage.get(id, Property::Y).unwrap(), 105.9));
        assert_eq!(stage.get(id, Property::Rotation).unwrap(), 20.0);
        assert_eq!(stage.actor(id).unwrap().sprite().rotation(), -20.0);
    }

    #[test]
    fn test_launch_needs_two_numbers() {
        let mut stage = Stage::new(StageConfig::default());
        let id = stage.spawn(Banana::builder(0.0, 0.0)).unwrap();
        assert!(matches!(
            stage.invoke(id, "launch", &[Value::from(45.0)]),
            Err(Error::InvalidArgument(_))
        ));
    }
}
