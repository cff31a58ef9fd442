use std::marker::PhantomData;

use redactif::{redact, Redact};

struct NoImpls;

#[derive(Redact)]
struct Page<T, U, M> {
    items: Vec<T>,
    #[redactif(when = "export", opaque)]
    cursor: U,
    #[redactif(skip)]
    skipped: Option<M>,
    marker: PhantomData<M>,
}

fn main() {
    // `U` only needs `Default` and `M` needs nothing.
    let mut page = Page::<String, Vec<NoImpls>, NoImpls> {
        items: vec!["x".into()],
        cursor: Vec::new(),
        skipped: None,
        marker: PhantomData,
    };
    redact(&mut page, ["export"]);
}
