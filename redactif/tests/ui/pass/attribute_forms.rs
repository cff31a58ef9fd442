use redactif::{redact, Redact};

#[derive(Default)]
struct Foreign(u8);

#[derive(Redact)]
struct Account {
    id: u64,
    #[redactif = "export"]
    email: String,
    #[redactif(when = "export,!admin")]
    phone: Option<String>,
    #[redactif(when = "audit", opaque)]
    foreign: Foreign,
    #[redactif(opaque)]
    untouched: Foreign,
    #[redactif(skip)]
    cache: std::rc::Rc<Foreign>,
}

#[derive(Redact)]
enum Event {
    Created(Account),
    Renamed {
        #[redactif = "export"]
        from: String,
        to: String,
    },
    Deleted,
}

fn main() {
    let mut events = vec![Event::Deleted, Event::Renamed { from: "a".into(), to: "b".into() }];
    redact(&mut events, ["export"]);
    let _ = Event::Created;
}
