//! Edge-case coverage for traversal boundaries.
//!
//! These tests focus on where the walk stops (maps, shared references,
//! borrowed cells, skipped and opaque fields) and on the shapes the derive
//! accepts: generics, enums, tuple structs and raw identifiers.

use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
    marker::PhantomData,
    rc::{Rc, Weak},
    sync::{Arc, Mutex},
    thread,
};

use redactif::{redact, FieldAccess, Kind, Record, Redact};

#[derive(Clone, Debug, Default, PartialEq, Redact)]
struct Secret {
    label: String,
    #[redactif = "a"]
    value: String,
}

fn secret(value: &str) -> Secret {
    Secret {
        label: "label".into(),
        value: value.into(),
    }
}

// ============================================================================
// Where the walk stops
// ============================================================================

#[test]
fn test_map_contents_are_never_touched() {
    #[derive(Redact)]
    struct Registry {
        by_name: HashMap<String, Secret>,
        ordered: Vec<BTreeMap<u32, Secret>>,
        #[redactif = "a"]
        note: String,
    }

    let mut registry = Registry {
        by_name: HashMap::from([("k".to_string(), secret("s1"))]),
        ordered: vec![BTreeMap::from([(1, secret("s2"))])],
        note: "n".into(),
    };
    redact(&mut registry, ["a"]);

    assert!(registry.note.is_empty());
    assert_eq!(registry.by_name["k"].value, "s1");
    assert_eq!(registry.ordered[0][&1].value, "s2");
}

#[test]
fn test_shared_references_are_a_hard_stop() {
    #[derive(Redact)]
    struct View<'a> {
        borrowed: &'a Secret,
        owned: Secret,
    }

    let outside = secret("s1");
    let mut view = View {
        borrowed: &outside,
        owned: secret("s2"),
    };
    redact(&mut view, ["a"]);

    assert_eq!(view.borrowed.value, "s1");
    assert!(view.owned.value.is_empty());
}

#[test]
fn test_generic_borrows_and_tagged_containers_need_no_impls() {
    struct Opaque;

    #[derive(Redact)]
    struct Lookup<'a, T> {
        source: &'a T,
        #[redactif(when = "a", opaque)]
        hits: Vec<T>,
        #[redactif = "a"]
        note: Option<String>,
    }

    let source = Opaque;
    let mut lookup = Lookup {
        source: &source,
        hits: vec![Opaque, Opaque],
        note: Some("n".into()),
    };
    redact(&mut lookup, ["b"]);
    assert_eq!(lookup.hits.len(), 2);

    redact(&mut lookup, ["a"]);
    assert!(lookup.hits.is_empty());
    assert!(lookup.note.is_none());
    assert!(std::ptr::eq(lookup.source, &source));
}

#[test]
fn test_borrowed_cell_is_skipped_with_its_subtree() {
    #[derive(Redact)]
    struct Holder {
        shared: Rc<RefCell<Secret>>,
    }

    let shared = Rc::new(RefCell::new(secret("s")));
    let mut holder = Holder {
        shared: Rc::clone(&shared),
    };

    let reader = shared.borrow();
    redact(&mut holder, ["a"]);
    assert_eq!(reader.value, "s");
    drop(reader);

    redact(&mut holder, ["a"]);
    assert!(shared.borrow().value.is_empty());
}

#[test]
fn test_skipped_fields_need_no_impls() {
    struct Connection;

    #[derive(Redact)]
    struct Session {
        #[redactif(skip)]
        connection: Rc<Connection>,
        #[redactif(skip)]
        cached: Secret,
        live: Secret,
    }

    let mut session = Session {
        connection: Rc::new(Connection),
        cached: secret("c"),
        live: secret("l"),
    };
    redact(&mut session, ["a"]);

    assert_eq!(session.cached.value, "c");
    assert!(session.live.value.is_empty());
    assert_eq!(Rc::strong_count(&session.connection), 1);
}

#[test]
fn test_opaque_fields_are_reset_but_never_walked() {
    #[derive(Default)]
    struct Blob(Vec<u8>);

    #[derive(Redact)]
    struct Upload {
        #[redactif(when = "a", opaque)]
        blob: Blob,
        #[redactif(when = "b", opaque)]
        preview: Vec<Secret>,
        #[redactif(opaque)]
        raw: Blob,
    }

    let mut upload = Upload {
        blob: Blob(vec![1, 2, 3]),
        preview: vec![secret("p")],
        raw: Blob(vec![4]),
    };
    redact(&mut upload, ["a"]);

    assert!(upload.blob.0.is_empty());
    assert_eq!(upload.preview[0].value, "p");
    assert_eq!(upload.raw.0, vec![4]);

    redact(&mut upload, ["b"]);
    assert!(upload.preview.is_empty());
}

// ============================================================================
// Containers and indirections
// ============================================================================

#[test]
fn test_sequences_tuples_and_results_are_walked() {
    #[derive(Redact)]
    struct Batch {
        items: Vec<Secret>,
        pairs: [(Secret, u8); 2],
        outcome: Result<Secret, String>,
        maybe: Option<Box<Secret>>,
    }

    let mut batch = Batch {
        items: vec![secret("i1"), secret("i2")],
        pairs: [(secret("p1"), 1), (secret("p2"), 2)],
        outcome: Ok(secret("o")),
        maybe: Some(Box::new(secret("m"))),
    };
    redact(&mut batch, ["a"]);

    assert!(batch.items.iter().all(|s| s.value.is_empty()));
    assert!(batch.pairs.iter().all(|(s, _)| s.value.is_empty()));
    assert_eq!(batch.pairs[1].1, 2);
    assert_eq!(batch.outcome.map(|s| s.value), Ok(String::new()));
    assert_eq!(batch.maybe.map(|s| s.label), Some("label".to_string()));
}

#[test]
fn test_trait_objects_are_walked() {
    trait Credential: Redact {
        fn value(&self) -> &str;
    }

    impl Credential for Secret {
        fn value(&self) -> &str {
            &self.value
        }
    }

    #[derive(Redact)]
    struct Wallet {
        credentials: Vec<Box<dyn Credential>>,
    }

    let mut wallet = Wallet {
        credentials: vec![Box::new(secret("x")), Box::new(secret("y"))],
    };
    redact(&mut wallet, ["a"]);
    assert!(wallet.credentials.iter().all(|c| c.value().is_empty()));
}

#[test]
fn test_parent_and_child_with_weak_back_pointer() {
    #[derive(Default, Redact)]
    struct Node {
        #[redactif = "a"]
        name: String,
        parent: Weak<RefCell<Node>>,
        children: Vec<Rc<RefCell<Node>>>,
    }

    let root = Rc::new(RefCell::new(Node {
        name: "root".into(),
        ..Node::default()
    }));
    let child = Rc::new(RefCell::new(Node {
        name: "child".into(),
        parent: Rc::downgrade(&root),
        ..Node::default()
    }));
    root.borrow_mut().children.push(Rc::clone(&child));

    redact(Rc::clone(&child), ["a"]);
    assert!(child.borrow().name.is_empty());
    assert!(root.borrow().name.is_empty());
}

#[test]
fn test_arc_mutex_shared_across_threads() {
    #[derive(Redact)]
    struct Job {
        shared: Arc<Mutex<Secret>>,
    }

    let shared = Arc::new(Mutex::new(secret("s")));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let mut job = Job {
                shared: Arc::clone(&shared),
            };
            thread::spawn(move || {
                redact(&mut job, ["a"]);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // A thread that finds the lock held skips it; nothing is held now.
    let mut job = Job { shared };
    redact(&mut job, ["a"]);
    assert!(job.shared.lock().unwrap().value.is_empty());
}

// ============================================================================
// Derive shapes
// ============================================================================

#[test]
fn test_generic_fields() {
    #[derive(Redact)]
    struct Envelope<T, M> {
        #[redactif = "a"]
        payload: T,
        body: Vec<T>,
        _marker: PhantomData<M>,
    }

    struct NotRedact;

    let mut envelope = Envelope::<Secret, NotRedact> {
        payload: secret("p"),
        body: vec![secret("b")],
        _marker: PhantomData,
    };
    redact(&mut envelope, ["a"]);
    assert_eq!(envelope.payload, Secret::default());
    assert!(envelope.body[0].value.is_empty());
    assert_eq!(envelope.body[0].label, "label");

    let mut text = Envelope::<String, ()> {
        payload: "p".into(),
        body: vec!["b".into()],
        _marker: PhantomData,
    };
    redact(&mut text, ["b"]);
    assert_eq!(text.payload, "p");
}

#[derive(Debug, PartialEq, Redact)]
enum Login {
    Password {
        user: String,
        #[redactif = "!admin"]
        secret: String,
    },
    Token(#[redactif = "a"] String, u32),
    Nested(Secret),
    Anonymous,
}

#[test]
fn test_enum_variants() {
    let mut logins = vec![
        Login::Password {
            user: "ana".into(),
            secret: "hunter2".into(),
        },
        Login::Token("t".into(), 7),
        Login::Nested(secret("n")),
        Login::Anonymous,
    ];
    redact(&mut logins, ["a"]);

    assert_eq!(
        logins,
        vec![
            Login::Password {
                user: "ana".into(),
                secret: String::new(),
            },
            Login::Token(String::new(), 7),
            Login::Nested(Secret {
                label: "label".into(),
                value: String::new(),
            }),
            Login::Anonymous,
        ]
    );
}

#[test]
fn test_enum_metadata_lists_every_variant() {
    let names: Vec<_> = Login::FIELDS
        .iter()
        .map(|field| (field.variant(), field.name()))
        .collect();
    assert_eq!(
        names,
        vec![
            (Some("Password"), "user"),
            (Some("Password"), "secret"),
            (Some("Token"), "0"),
            (Some("Token"), "1"),
            (Some("Nested"), "0"),
        ]
    );
}

#[test]
fn test_tuple_struct_and_raw_identifiers() {
    #[derive(Redact)]
    struct Pair(#[redactif = "a"] String, String);

    #[derive(Redact)]
    struct Raw {
        #[redactif = "a"]
        r#type: String,
    }

    let mut pair = Pair("x".into(), "y".into());
    redact(&mut pair, ["a"]);
    assert_eq!((pair.0.as_str(), pair.1.as_str()), ("", "y"));

    let mut raw = Raw { r#type: "t".into() };
    redact(&mut raw, ["a"]);
    assert!(raw.r#type.is_empty());
    assert_eq!(Raw::field("type").map(|f| f.ty()), Some("String"));
}

#[test]
fn test_unit_and_empty_types() {
    #[derive(Redact)]
    struct Marker;

    #[derive(Redact)]
    enum Never {}

    assert!(Marker::FIELDS.is_empty());
    assert!(Never::FIELDS.is_empty());
    assert_eq!(Marker.kind(), Kind::Record);
    redact(&mut Marker, ["a"]);
}

#[test]
fn test_field_metadata() {
    #[derive(Redact)]
    struct Profile {
        id: u64,
        #[redactif(when = "export,!admin", opaque)]
        email: String,
        #[redactif(skip)]
        cache: Vec<u8>,
    }

    let id = Profile::field("id").unwrap();
    assert!(id.tags().is_none());
    assert_eq!(id.access(), FieldAccess::Walk);

    let email = Profile::field("email").unwrap();
    assert_eq!(email.tags().unwrap().as_str(), "export,!admin");
    assert_eq!(email.access(), FieldAccess::Opaque);
    assert!(email.variant().is_none());

    assert_eq!(Profile::field("cache").unwrap().access(), FieldAccess::Skip);
    assert_eq!(Profile::FIELDS.len(), 3);
}

#[test]
fn test_explicit_crate_path() {
    #[derive(Redact)]
    #[redactif(crate = "::redactif")]
    struct Pinned {
        #[redactif = "a"]
        value: String,
    }

    let mut pinned = Pinned { value: "v".into() };
    redact(&mut pinned, ["a"]);
    assert!(pinned.value.is_empty());
}
