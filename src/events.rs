use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    Init,
    Destroy,
    Reset,
    Play,
    Pause,
    Stop,
    Resize,
    /// Fired after every repaint.
    Draw,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Event::Init => "init",
            Event::Destroy => "destroy",
            Event::Reset => "reset",
            Event::Play => "play",
            Event::Pause => "pause",
            Event::Stop => "stop",
            Event::Resize => "resize",
            Event::Draw => "draw",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Handler = Box<dyn FnMut(Event)>;

struct Listener {
    id: ListenerId,
    event: Event,
    once: bool,
    handler: Handler,
}

/// Observer list owned by one controller.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    listeners: Vec<Listener>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, event: Event, once: bool, handler: Handler) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push(Listener { id, event, once, handler });
        id
    }

    pub fn on(&mut self, event: Event, handler: impl FnMut(Event) + 'static) -> ListenerId {
        self.add(event, false, Box::new(handler))
    }

    pub fn once(&mut self, event: Event, handler: impl FnMut(Event) + 'static) -> ListenerId {
        self.add(event, true, Box::new(handler))
    }

    pub fn off(&mut self, event: Event, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| !(l.id == id && l.event == event));
        self.listeners.len() != before
    }

    /// Drops every listener for `event` and returns how many there were.
    pub fn off_all(&mut self, event: Event) -> usize {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.event != event);
        before - self.listeners.len()
    }

    /// Calls every handler registered for `event`, in registration order.
    pub fn emit(&mut self, event: Event) {
        self.listeners.retain_mut(|l| {
            if l.event != event {
                return true;
            }
            (l.handler)(event);
            !l.once
        });
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.listeners.len())
            .finish()
    }
}
