/// Everything the deck reports to the outside world. The core never touches
/// presentation state; the rendering layer subscribes and reacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckEvent {
    CardChanged,
    FeverEntered,
    FeverExited,
    FavoriteToggled { key: String, favorite: bool },
    NoContentAvailable,
}

/// Typed observer list. Handlers run synchronously in subscription order and
/// must not call back into the deck; queue the event and act after the call
/// returns (the UI drains a pending list, tests record into a Vec).
#[derive(Default)]
pub struct EventBus {
    handlers: Vec<Box<dyn Fn(&DeckEvent)>>,
}

impl EventBus {
    pub fn subscribe<F: Fn(&DeckEvent) + 'static>(&mut self, handler: F) {
        self.handlers.push(Box::new(handler));
    }

    pub fn emit(&self, event: DeckEvent) {
        for handler in &self.handlers {
            handler(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn handlers_run_in_subscription_order() {
        let mut bus = EventBus::default();
        let log: Rc<RefCell<Vec<&'static str>>> = Rc::default();

        let first = log.clone();
        bus.subscribe(move |_| first.borrow_mut().push("first"));
        let second = log.clone();
        bus.subscribe(move |_| second.borrow_mut().push("second"));

        bus.emit(DeckEvent::CardChanged);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn payload_events_carry_their_data() {
        let mut bus = EventBus::default();
        let log: Rc<RefCell<Vec<DeckEvent>>> = Rc::default();
        let sink = log.clone();
        bus.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        bus.emit(DeckEvent::FavoriteToggled {
            key: "ami/primary/1".to_string(),
            favorite: true,
        });
        assert_eq!(
            *log.borrow(),
            vec![DeckEvent::FavoriteToggled {
                key: "ami/primary/1".to_string(),
                favorite: true,
            }]
        );
    }
}
