//! The stage: registry, clock and task queue driven one tick at a time

use crate::actor::{Actor, ActorBuilder};
use crate::capability::{Capability, Command, Composed, Ctx, UPDATE};
use crate::config::StageConfig;
use crate::error::{Error, Result};
use crate::identity::ActorId;
use crate::property::{Property, PropertyValue};
use crate::registry::{ActorRegistry, LiveActors};
use crate::render::{ActorView, Renderer};
use crate::sprite::Sprite;
use crate::task::{FrameScheduler, Job, Task, TaskId, TaskScheduler};
use crate::time::{Clock, Delay, Frame};
use crate::value::Value;
use log::{debug, error, info, warn};

/// A failure recorded during a tick
#[derive(Debug)]
pub struct Failure {
    /// The actor involved, if any
    pub actor: Option<ActorId>,
    pub error: Error,
}

/// Result of one tick
#[derive(Debug)]
pub struct TickReport {
    /// The frame that was processed
    pub frame: Frame,
    /// Actors whose update hook ran successfully
    pub updated: usize,
    /// Tasks that came due and ran (successfully or not)
    pub tasks_run: usize,
    /// Interpolations still attached after this tick
    pub interpolating: usize,
    /// Failures collected instead of aborting the tick
    pub failures: Vec<Failure>,
}

impl TickReport {
    fn new(frame: Frame) -> Self {
        Self {
            frame,
            updated: 0,
            tasks_run: 0,
            interpolating: 0,
            failures: Vec::new(),
        }
    }

    /// Check whether the tick ran without failures
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Owner of every live actor and the entry point for the frame driver
///
/// A stage is created when the engine starts and passed to whoever needs it;
/// there is no global instance. It is confined to the thread that drives the
/// frames.
#[derive(Debug)]
pub struct Stage {
    config: StageConfig,
    clock: Clock,
    registry: ActorRegistry,
    tasks: FrameScheduler,
}

impl Stage {
    /// Create an empty stage
    pub fn new(config: StageConfig) -> Self {
        let fps = config.frames_per_second();
        info!(
            "stage started: {}x{} at {} fps",
            config.width, config.height, fps
        );
        Self {
            config,
            clock: Clock::new(fps),
            registry: ActorRegistry::new(),
            tasks: FrameScheduler::new(fps),
        }
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn registry(&self) -> &ActorRegistry {
        &self.registry
    }

    /// Lazy view of the live actors in draw order
    pub fn live_actors(&self) -> LiveActors<'_> {
        self.registry.live_actors()
    }

    pub fn is_live(&self, id: ActorId) -> bool {
        self.registry.contains(id)
    }

    pub fn actor(&self, id: ActorId) -> Result<&Actor> {
        self.registry.live(id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Result<&mut Actor> {
        self.registry.live_mut(id)
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Build, initialize and register a new actor
    ///
    /// The pivot is centered on the actor's size, the position defaults to the
    /// configured origin, and the base capability's initializer runs with the
    /// builder's arguments before the actor joins the registry.
    pub fn spawn(&mut self, builder: ActorBuilder) -> Result<ActorId> {
        let id = self.registry.allocate_id();
        self.spawn_as(id, builder)?;
        Ok(id)
    }

    fn spawn_as(&mut self, id: ActorId, builder: ActorBuilder) -> Result<()> {
        let ActorBuilder {
            base,
            size,
            position,
            image,
            args,
        } = builder;

        let mut actor = Actor::new(id, Sprite::new(size.0, size.1));
        let (x, y) = position.unwrap_or_else(|| self.config.origin());
        actor.set(Property::X, x)?;
        actor.set(Property::Y, y)?;
        actor.body.sprite_mut().set_image(image);

        let mut commands = Vec::new();
        let init = {
            let Actor {
                body, capabilities, ..
            } = &mut actor;
            let mut ctx = Ctx::new(
                body,
                &self.clock,
                &mut self.tasks,
                self.registry.ids_mut(),
                &mut commands,
            );
            capabilities.compose(base, &mut ctx, &args)
        };

        if let Err(err) = init {
            let cancelled = self.tasks.cancel_for(id);
            warn!(
                "{} failed to initialize ({}); {} task(s) dropped",
                id, err, cancelled
            );
            return Err(err);
        }

        debug!("spawned {} as {:?}", id, actor.capability_names());
        self.registry.register(actor);
        self.apply_commands(commands);
        Ok(())
    }

    /// Remove an actor from the stage
    ///
    /// Interpolations driving its properties are detached and pending tasks
    /// whose subject it is are cancelled. Killing an actor that is not live
    /// fails with [`Error::NotRegistered`].
    pub fn kill(&mut self, id: ActorId) -> Result<Actor> {
        let mut actor = self.registry.unregister(id)?;
        let detached = actor.body.detach_interpolations();
        let cancelled = self.tasks.cancel_for(id);
        debug!(
            "killed {} ({} interpolation(s) detached, {} task(s) cancelled)",
            id, detached, cancelled
        );
        Ok(actor)
    }

    /// Kill every remaining actor, newest first, and return how many there were
    pub fn shutdown(mut self) -> usize {
        let ids = self.registry.ids();
        for &id in ids.iter().rev() {
            if let Err(err) = self.kill(id) {
                warn!("shutdown: {}", err);
            }
        }
        info!(
            "stage stopped after {} frame(s), {} actor(s) removed",
            self.clock.frame(),
            ids.len()
        );
        ids.len()
    }

    /// Move an actor to `index` in draw order
    pub fn move_to(&mut self, id: ActorId, index: usize) -> Result<()> {
        self.registry.move_to(id, index)
    }

    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------

    /// Assign a property of a live actor
    pub fn set(
        &mut self,
        id: ActorId,
        property: Property,
        value: impl Into<PropertyValue>,
    ) -> Result<()> {
        self.registry.live_mut(id)?.set(property, value)
    }

    /// Assign a property addressed by name
    pub fn set_by_name(
        &mut self,
        id: ActorId,
        name: &str,
        value: impl Into<PropertyValue>,
    ) -> Result<()> {
        let property: Property = name.parse()?;
        self.set(id, property, value)
    }

    /// Read a property of a live actor
    pub fn get(&self, id: ActorId, property: Property) -> Result<f64> {
        self.registry.live(id)?.get(property)
    }

    pub fn get_by_name(&self, id: ActorId, name: &str) -> Result<f64> {
        let property: Property = name.parse()?;
        self.get(id, property)
    }

    // ------------------------------------------------------------------
    // Capabilities
    // ------------------------------------------------------------------

    /// Compose a default-constructed capability of type `C` into an actor
    pub fn compose<C: Capability + Default>(
        &mut self,
        id: ActorId,
        args: &[Value],
    ) -> Result<Composed> {
        self.compose_boxed(id, Box::new(C::default()), args)
    }

    /// Compose `capability` into an actor and run its initializer
    ///
    /// Safe at any point of a live actor's life. Re-composing a capability the
    /// actor already has runs its initializer again and returns
    /// [`Composed::Reattached`]. The existing instance keeps its place in the
    /// composition order, so capabilities composed after it still shadow the
    /// methods they share with it.
    pub fn compose_boxed(
        &mut self,
        id: ActorId,
        capability: Box<dyn Capability>,
        args: &[Value],
    ) -> Result<Composed> {
        let mut commands = Vec::new();
        let result = {
            let (actor, ids) = self.registry.split_mut(id)?;
            let Actor {
                body, capabilities, ..
            } = actor;
            let mut ctx = Ctx::new(body, &self.clock, &mut self.tasks, ids, &mut commands);
            capabilities.compose(capability, &mut ctx, args)
        };
        self.apply_commands(commands);
        result
    }

    /// Call a capability method on a live actor
    ///
    /// The most recently composed capability that answers `method` runs.
    pub fn invoke(&mut self, id: ActorId, method: &str, args: &[Value]) -> Result<Value> {
        let mut commands = Vec::new();
        let result = {
            let (actor, ids) = self.registry.split_mut(id)?;
            let Actor {
                body, capabilities, ..
            } = actor;
            let mut ctx = Ctx::new(body, &self.clock, &mut self.tasks, ids, &mut commands);
            capabilities.call(method, &mut ctx, args)
        };
        self.apply_commands(commands);
        result
    }

    fn apply_commands(&mut self, commands: Vec<Command>) {
        for command in commands {
            let result = match command {
                Command::Spawn(id, builder) => self.spawn_as(id, builder),
                Command::Kill(id) => self.kill(id).map(|_| ()),
            };
            if let Err(err) = result {
                warn!("deferred command failed: {}", err);
            }
        }
    }

    // ------------------------------------------------------------------
    // Tasks
    // ------------------------------------------------------------------

    /// Queue a task to run after `delay`
    pub fn schedule(&mut self, delay: Delay, task: Task) -> TaskId {
        self.tasks.schedule(delay, task)
    }

    /// Run `f` against the stage after `delay`
    pub fn after(
        &mut self,
        delay: Delay,
        f: impl FnOnce(&mut Stage) -> Result<()> + 'static,
    ) -> TaskId {
        self.tasks.schedule(delay, Task::call(f))
    }

    /// Cancel a pending task
    pub fn cancel(&mut self, task: TaskId) -> bool {
        self.tasks.cancel(task)
    }

    pub fn tasks(&self) -> &FrameScheduler {
        &self.tasks
    }

    fn run_task(&mut self, task: Task) -> Result<()> {
        match task.into_job() {
            Job::Invoke {
                actor,
                method,
                args,
            } => self.invoke(actor, &method, &args).map(|_| ()),
            Job::Kill(actor) => self.kill(actor).map(|_| ()),
            Job::Call(f) => f(self),
        }
    }

    // ------------------------------------------------------------------
    // Frame driver
    // ------------------------------------------------------------------

    /// Advance the stage by one frame
    ///
    /// 1. Advance the clock and snapshot the live actors in draw order.
    /// 2. Run the tasks that came due.
    /// 3. For each actor of the snapshot still live: advance its
    ///    interpolations, then run its `update` method if it has one.
    ///
    /// Actors spawned during the tick, by tasks or by other actors, first
    /// appear in the next tick's snapshot; actors killed during the tick are
    /// skipped. A failing actor
    /// is logged and recorded in the report, and the tick carries on.
    pub fn tick(&mut self) -> TickReport {
        self.clock.advance();
        let frame = self.clock.frame();
        self.tasks.advance_to(frame);
        let snapshot = self.registry.ids();
        let mut report = TickReport::new(frame);

        for (_, task) in self.tasks.take_due(frame) {
            let subject = task.subject();
            report.tasks_run += 1;
            if let Err(err) = self.run_task(task) {
                warn!("frame {}: task failed: {}", frame, err);
                report.failures.push(Failure {
                    actor: subject,
                    error: err,
                });
            }
        }

        let time = self.clock.frame_time();
        for id in snapshot {
            let Some(actor) = self.registry.get_mut(id) else {
                continue;
            };

            match actor.advance_interpolations(time) {
                Ok(running) => report.interpolating += running,
                Err(err) => {
                    report.failures.push(Failure {
                        actor: Some(id),
                        error: err,
                    });
                    continue;
                }
            }

            if !actor.responds_to(UPDATE) {
                continue;
            }
            match self.invoke(id, UPDATE, &[]) {
                Ok(_) => report.updated += 1,
                Err(err) => {
                    error!("frame {}: {} update failed: {}", frame, id, err);
                    report.failures.push(Failure {
                        actor: Some(id),
                        error: err,
                    });
                }
            }
        }

        report
    }

    /// Hand every visible live actor to `renderer`, in draw order
    pub fn render(&self, renderer: &mut dyn Renderer) {
        renderer.begin_frame(self.clock.frame());
        for actor in self.live_actors() {
            if actor.sprite().is_visible() {
                renderer.draw(ActorView::new(actor));
            }
        }
        renderer.end_frame();
    }
}
