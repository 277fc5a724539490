//! Demonstrates composing subscriptions and a replaceable timer
//!
//! Run with: cargo run --example subscriptions --features tracing

use std::rc::Rc;

use disposables::prelude::*;

fn subscribe(event: &'static str) -> Rc<Disposable> {
    tracing::info!("subscribed to {}", event);
    Rc::new(Disposable::new(move || {
        tracing::info!("unsubscribed from {}", event)
    }))
}

fn start_timer(id: u32) -> Rc<Disposable> {
    tracing::info!("timer {} started", id);
    Rc::new(Disposable::new(move || tracing::info!("timer {} cancelled", id)))
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let session = CompositeDisposable::new();
    session.add(subscribe("click"));
    session.add(subscribe("keypress"));

    // Debounce: each keystroke restarts the timer
    let debounce = Rc::new(SerialDisposable::new());
    session.add(debounce.clone());
    for id in 1..=3 {
        debounce.set_disposable(Some(start_timer(id)));
    }

    let scroll = subscribe("scroll");
    session.add(scroll.clone());
    if session.remove(&scroll) {
        tracing::info!("scroll listener removed early");
    }

    tracing::info!("closing session with {} members", session.len());
    session.dispose();

    // Late registrations are released on arrival
    session.add(subscribe("resize"));
    tracing::info!("session disposed: {}", session.is_disposed());
}
