use alphascroll::geometry::{indicator_percent, seek_offset};
use alphascroll::{ControlRect, SectionBounds, locate_in_control};

fn main() {
    // Three sections: 'a' at 0, 'b' at 500, 'z' at 900; the list ends at 1200.
    let bounds = SectionBounds::from_starts(
        [("a", 0.0), ("b", 500.0), ("z", 900.0)],
        1200.0,
    )
    .expect("valid bounds");

    for offset in [0.0, 250.0, 500.0, 650.0, 900.0, 1200.0] {
        let index = bounds.locate(offset);
        println!(
            "offset={offset:>6.1} section={:?} indicator={:.2}%",
            bounds.key(index),
            indicator_percent(&bounds, offset)
        );
    }

    // A 300px index control: each letter gets an equal 100px row.
    let control = ControlRect::new(0.0, 300.0);
    for pointer in [0.0, 150.0, 200.0, 299.0] {
        let hit = locate_in_control(control, pointer, bounds.len()).expect("measured control");
        let dest = seek_offset(&bounds, hit.index, hit.fraction, 1200.0).expect("in range");
        println!(
            "pointer={pointer:>5.1} section={:?} fraction={:.2} -> scroll_to {dest:.1}",
            bounds.key(hit.index),
            hit.fraction
        );
    }
}
