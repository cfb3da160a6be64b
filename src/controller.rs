use crate::chain::Chain;
use crate::config::Config;
use crate::driver::{AnimationDriver, FrameHandle, FrameScheduler};
use crate::events::{Event, ListenerId, Listeners};
use crate::motion::MotionState;
use crate::render::render;
use crate::surface::{Container, Surface, SurfaceSize};
use crate::throttle::Throttle;
use std::time::Duration;
use tracing::{debug, info, trace};

/// Minimum gap between two handled resizes.
pub const RESIZE_DELAY: Duration = Duration::from_millis(250);

/// Everything that only exists between `init` and `destroy`.
struct Scene<S> {
    surface: S,
    size: SurfaceSize,
    chain: Chain,
    motion: MotionState,
    resize: Throttle<()>,
}

/// Lifecycle facade tying the chain, motion, pacing and painting together.
///
/// Every call made while uninitialized, other than `init`, does nothing and
/// emits nothing. The same goes for `play` while playing and `pause` while
/// paused. Methods return `&mut Self` so calls can be chained.
pub struct SnakeController<C: Container, F: FrameScheduler> {
    config: Config,
    container: C,
    scheduler: F,
    driver: AnimationDriver,
    listeners: Listeners,
    scene: Option<Scene<C::Surface>>,
}

impl<C: Container, F: FrameScheduler> SnakeController<C, F> {
    pub fn new(container: C, scheduler: F, config: Config) -> Self {
        let config = config.normalized();
        Self {
            driver: AnimationDriver::new(config.speed()),
            config,
            container,
            scheduler,
            listeners: Listeners::new(),
            scene: None,
        }
    }

    pub fn init(&mut self) -> &mut Self {
        if self.scene.is_some() {
            return self;
        }
        let size = self.container.content_size();
        let surface = self.container.attach(size);
        self.scene = Some(Scene {
            surface,
            size,
            chain: Chain::initialize(size, &self.config),
            motion: MotionState::new(),
            resize: Throttle::new(RESIZE_DELAY),
        });
        self.redraw();
        info!(
            width = size.width,
            height = size.height,
            length = self.config.length,
            "snake initialized"
        );
        self.listeners.emit(Event::Init);
        self
    }

    /// Puts the snake back to its starting layout and heading.
    pub fn reset(&mut self) -> &mut Self {
        let Some(scene) = self.scene.as_mut() else {
            return self;
        };
        scene.chain = Chain::initialize(scene.size, &self.config);
        scene.motion = MotionState::new();
        self.redraw();
        debug!("snake reset");
        self.listeners.emit(Event::Reset);
        self
    }

    pub fn play(&mut self) -> &mut Self {
        if self.scene.is_none() || !self.driver.start(&mut self.scheduler) {
            return self;
        }
        info!(speed_ms = self.config.speed, "snake playing");
        self.listeners.emit(Event::Play);
        self
    }

    pub fn pause(&mut self) -> &mut Self {
        if self.scene.is_none() || !self.driver.stop(&mut self.scheduler) {
            return self;
        }
        info!("snake paused");
        self.listeners.emit(Event::Pause);
        self
    }

    /// Pause, then reset.
    pub fn stop(&mut self) -> &mut Self {
        if self.scene.is_none() {
            return self;
        }
        self.pause();
        self.reset();
        self.listeners.emit(Event::Stop);
        self
    }

    /// Releases the surface and drops every listener after a last `destroy`.
    pub fn destroy(&mut self) -> &mut Self {
        if self.scene.is_none() {
            return self;
        }
        self.stop();
        if let Some(scene) = self.scene.take() {
            self.container.detach(scene.surface);
        }
        info!("snake destroyed");
        self.listeners.emit(Event::Destroy);
        self.listeners.clear();
        self
    }

    /// Host callback for a frame requested through the scheduler.
    ///
    /// When a move is due this runs one tick: wall check, paint, then step.
    pub fn frame(&mut self, handle: FrameHandle, timestamp: Duration) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        if !self.driver.on_frame(&mut self.scheduler, handle, timestamp) {
            return;
        }
        let thickness = self.config.thickness;
        if let Some(head) = scene.chain.head() {
            scene.motion.check_walls(head, scene.size, thickness);
        }
        render(&mut scene.surface, &scene.chain, &self.config);
        self.listeners.emit(Event::Draw);
        let direction = scene.motion.commit();
        scene.chain.advance(direction, thickness);
        trace!(?direction, head = ?scene.chain.head(), "tick");
    }

    /// Host callback for a container resize. Bursts are coalesced; call
    /// `poll` afterwards so the trailing one gets applied.
    pub fn notify_resize(&mut self, now: Duration) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        if scene.resize.push(now, ()).is_some() {
            self.apply_resize();
        }
    }

    /// Applies a held-back resize once its delay has passed.
    pub fn poll(&mut self, now: Duration) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        if scene.resize.poll(now).is_some() {
            self.apply_resize();
        }
    }

    fn apply_resize(&mut self) {
        let size = self.container.content_size();
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        scene.size = size;
        scene.surface.resize(size);
        self.redraw();
        debug!(width = size.width, height = size.height, "snake resized");
        self.listeners.emit(Event::Resize);
    }

    fn redraw(&mut self) {
        if let Some(scene) = self.scene.as_mut() {
            render(&mut scene.surface, &scene.chain, &self.config);
            self.listeners.emit(Event::Draw);
        }
    }

    pub fn on(&mut self, event: Event, handler: impl FnMut(Event) + 'static) -> ListenerId {
        self.listeners.on(event, handler)
    }

    pub fn once(&mut self, event: Event, handler: impl FnMut(Event) + 'static) -> ListenerId {
        self.listeners.once(event, handler)
    }

    pub fn off(&mut self, event: Event, id: ListenerId) -> bool {
        self.listeners.off(event, id)
    }

    /// Removes every listener for `event`, returning how many went.
    pub fn off_all(&mut self, event: Event) -> usize {
        self.listeners.off_all(event)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.scene.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.driver.is_running()
    }

    pub fn size(&self) -> Option<SurfaceSize> {
        self.scene.as_ref().map(|s| s.size)
    }

    pub fn chain(&self) -> Option<&Chain> {
        self.scene.as_ref().map(|s| &s.chain)
    }

    pub fn motion(&self) -> Option<MotionState> {
        self.scene.as_ref().map(|s| s.motion)
    }

    pub fn surface(&self) -> Option<&C::Surface> {
        self.scene.as_ref().map(|s| &s.surface)
    }

    /// True while a throttled resize is waiting for `poll`.
    pub fn resize_pending(&self) -> bool {
        self.scene.as_ref().is_some_and(|s| s.resize.is_pending())
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }
}
