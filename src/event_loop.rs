use std::io;
use std::time::Duration;

use crossterm::event::Event;

use crate::drivers::InputDriver;

pub enum ControlFlow {
    Continue,
    Quit,
}

/// The single event pump driving the UI thread.
///
/// Only this loop calls `driver.poll()`/`driver.read()`. The handler is
/// invoked with `Some(event)` for input and with `None` once per poll
/// interval, which is where ticking and drawing happen. When input does
/// arrive, the whole pending burst is drained before control returns to
/// the idle arm, so high-frequency streams (mouse drags in particular)
/// never outrun the render cadence.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if let ControlFlow::Quit = handler(&mut self.driver, None)? {
                return Ok(());
            }
            if !self.driver.poll(self.poll_interval)? {
                continue;
            }
            if let ControlFlow::Quit = self.drain_burst(&mut handler)? {
                return Ok(());
            }
        }
    }

    /// Deliver every event already queued, stopping early on quit.
    fn drain_burst<F>(&mut self, handler: &mut F) -> io::Result<ControlFlow>
    where
        F: FnMut(&mut D, Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            let event = self.driver.read()?;
            if let ControlFlow::Quit = handler(&mut self.driver, Some(event))? {
                return Ok(ControlFlow::Quit);
            }
            if !self.driver.poll(Duration::from_millis(0))? {
                return Ok(ControlFlow::Continue);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::collections::VecDeque;

    struct ScriptedDriver {
        queue: VecDeque<Event>,
    }

    impl InputDriver for ScriptedDriver {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(!self.queue.is_empty())
        }

        fn read(&mut self) -> io::Result<Event> {
            self.queue
                .pop_front()
                .ok_or_else(|| io::Error::other("script exhausted"))
        }
    }

    fn key(ch: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE))
    }

    #[test]
    fn drains_a_burst_before_the_next_idle_tick() {
        let driver = ScriptedDriver {
            queue: VecDeque::from([key('a'), key('b'), key('q')]),
        };
        let mut event_loop = EventLoop::new(driver, Duration::from_millis(0));
        let mut seen = Vec::new();
        let mut idle_ticks = 0;
        event_loop
            .run(|_, event| match event {
                Some(Event::Key(k)) => {
                    seen.push(k.code);
                    if k.code == KeyCode::Char('q') {
                        Ok(ControlFlow::Quit)
                    } else {
                        Ok(ControlFlow::Continue)
                    }
                }
                Some(_) => Ok(ControlFlow::Continue),
                None => {
                    idle_ticks += 1;
                    Ok(ControlFlow::Continue)
                }
            })
            .unwrap();
        assert_eq!(
            seen,
            vec![KeyCode::Char('a'), KeyCode::Char('b'), KeyCode::Char('q')]
        );
        // one idle tick before the burst, none in between
        assert_eq!(idle_ticks, 1);
    }
}
