use alphascroll::{ControlRect, PointerKind, SyncOptions};
use alphascroll_adapter::{IndexBar, ScrollHost, SimulatedDocument};

fn main() {
    // Example: an alphabetical contact list with a fixed 75px header and an index bar on the
    // left edge. Each letter group is 40px per contact plus a 30px heading.
    let groups = [("a", 4), ("c", 9), ("d", 1), ("k", 6), ("m", 3), ("s", 7), ("z", 2)];
    let heights = groups
        .iter()
        .map(|&(letter, contacts)| (letter.to_string(), 30.0 + 40.0 * contacts as f64));

    let mut doc = SimulatedDocument::from_heights(75.0, heights, 640.0)
        .with_control(ControlRect::new(105.0, 430.0))
        .with_overshoot(12.0);

    let mut bar = IndexBar::new(SyncOptions::new().with_scroll_margin(75.0));
    let keys: Vec<String> = doc.keys().cloned().collect();
    let outcome = bar.attach(keys, &doc, &doc);
    println!("attach: {outcome:?}");

    // The user scrolls the document.
    let mut now_ms = 0u64;
    for offset in [0.0, 180.0, 420.0, 900.0] {
        now_ms += 16;
        doc.user_scroll(offset);
        bar.on_scroll(&doc, now_ms);
        println!(
            "scroll {offset:>6.1} -> active={:?} indicator={:.2}%",
            bar.active_key(),
            bar.indicator_percent()
        );
    }

    // The user drags a finger down the index bar.
    let mut y = 110.0;
    bar.on_pointer_down(&mut doc, y, PointerKind::Touch, now_ms);
    while y < 530.0 {
        now_ms += 10;
        y += 15.0;
        if let Some(off) = bar.on_pointer_move(&mut doc, y, PointerKind::Touch, now_ms) {
            println!(
                "drag  y={y:>5.1} -> scroll_to {off:>6.1} active={:?}",
                bar.active_key()
            );
        }
        for offset in doc.take_scroll_events() {
            doc.user_scroll(offset);
            bar.on_scroll(&doc, now_ms);
        }
        bar.tick(now_ms);
    }
    bar.on_pointer_up();

    for _ in 0..2 {
        now_ms += 16;
        bar.tick(now_ms);
    }
    println!(
        "done: offset={:.1} active={:?} settled={}",
        doc.scroll_offset(),
        bar.active_key(),
        !bar.controller().is_suppressed()
    );
}
