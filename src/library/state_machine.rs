use std::collections::VecDeque;

pub type TransitionFn<TState, TMsg, TEffect> =
    Box<dyn Fn(TState, TMsg) -> (TState, Vec<TEffect>) + Send>;
pub type RenderFn<TState> = Box<dyn FnMut(&TState) + Send>;
pub type RunEffectFn<TEffect, TMsg> = Box<dyn FnMut(TEffect) -> Option<TMsg> + Send>;

/// Single-threaded message loop. Messages are handled one at a time in
/// arrival order; each effect runs to completion and may answer with one
/// message, which joins the back of the queue.
pub struct StateMachine<TState, TMsg, TEffect> {
    state: TState,
    queue: VecDeque<TMsg>,
    init_effects: Vec<TEffect>,
    transition_fn: TransitionFn<TState, TMsg, TEffect>,
    render_fn: RenderFn<TState>,
    run_effect_fn: RunEffectFn<TEffect, TMsg>,
}

impl<TState, TMsg, TEffect> StateMachine<TState, TMsg, TEffect>
where
    TState: Clone + PartialEq,
{
    pub fn new(
        init: (TState, Vec<TEffect>),
        transition_fn: TransitionFn<TState, TMsg, TEffect>,
        render_fn: RenderFn<TState>,
        run_effect_fn: RunEffectFn<TEffect, TMsg>,
    ) -> Self {
        let (state, init_effects) = init;
        Self {
            state,
            queue: VecDeque::new(),
            init_effects,
            transition_fn,
            render_fn,
            run_effect_fn,
        }
    }

    pub fn state(&self) -> &TState {
        &self.state
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Renders the initial state and runs the initial effects. Calling it
    /// again only renders.
    pub fn start(&mut self) {
        (self.render_fn)(&self.state);
        let effects = std::mem::take(&mut self.init_effects);
        self.run_effects(effects);
    }

    pub fn send(&mut self, msg: TMsg) {
        self.queue.push_back(msg);
    }

    /// Handles the oldest queued message. Returns false when the queue was empty.
    pub fn step(&mut self) -> bool {
        let Some(msg) = self.queue.pop_front() else {
            return false;
        };

        let (new_state, effects) = (self.transition_fn)(self.state.clone(), msg);
        if new_state != self.state {
            self.state = new_state;
            (self.render_fn)(&self.state);
        }

        self.run_effects(effects);
        true
    }

    /// Steps until the queue is drained. Returns how many messages were handled.
    pub fn run_until_idle(&mut self) -> usize {
        let mut handled = 0;
        while self.step() {
            handled += 1;
        }
        handled
    }

    fn run_effects(&mut self, effects: Vec<TEffect>) {
        for effect in effects {
            if let Some(msg) = (self.run_effect_fn)(effect) {
                self.queue.push_back(msg);
            }
        }
    }
}
