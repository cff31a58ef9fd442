use redactif::{redact, Redact};

struct NoImpls;

#[derive(Redact)]
struct Item {
    #[redactif = "a"]
    name: String,
}

// `T` is only borrowed or held in tagged containers, so it needs no impls.
#[derive(Redact)]
struct View<'a, T> {
    borrowed: &'a T,
    #[redactif(when = "a", opaque)]
    ids: Vec<T>,
}

// Walked and tagged: `U` needs `Redact` for the walk, but not `Default`.
#[derive(Redact)]
struct Listing<U> {
    #[redactif = "b"]
    items: Vec<U>,
}

fn main() {
    let outside = NoImpls;
    let mut view = View {
        borrowed: &outside,
        ids: vec![NoImpls],
    };
    redact(&mut view, ["a"]);
    assert!(view.ids.is_empty());

    let mut listing = Listing {
        items: vec![Item { name: "x".into() }],
    };
    redact(&mut listing, ["a"]);
    assert!(listing.items[0].name.is_empty());
}
