use term_desk::apps::ViewProps;
use term_desk::geometry::{Geometry, Point, Size};
use term_desk::window::gesture::ResizeDirection;
use term_desk::window::{OpenRequest, WindowId, WindowManager};

fn request(id: &str, origin: Point, size: Size) -> OpenRequest {
    OpenRequest {
        id: WindowId::new(id),
        title: id.to_string(),
        kind: id.to_string(),
        props: ViewProps::default(),
        origin,
        size,
    }
}

fn manager() -> WindowManager {
    let mut wm = WindowManager::new();
    wm.set_work_area(Geometry::new(Point::new(0, 20), Size::new(1200, 720)));
    wm
}

#[test]
fn distinct_opens_accumulate_and_reopens_focus() {
    let mut wm = manager();
    let ids: Vec<WindowId> = ["terminal", "weather", "music", "snake"]
        .iter()
        .map(|kind| wm.open(request(kind, Point::new(100, 50), Size::new(800, 600))))
        .collect();
    assert_eq!(wm.len(), 4);

    // re-opening an already-open kind neither duplicates the record nor
    // changes its id, but does set it focused
    let again = wm.open(request("weather", Point::new(0, 0), Size::new(400, 400)));
    assert_eq!(again, ids[1]);
    assert_eq!(wm.len(), 4);
    assert_eq!(wm.focused(), Some(&ids[1]));
    // the reused record kept its original geometry
    assert_eq!(
        wm.get(&ids[1]).unwrap().geometry().origin,
        Point::new(100, 50)
    );
}

#[test]
fn size_floor_survives_extreme_resize_sequences() {
    let mut wm = manager();
    let id = wm.open(request("a", Point::new(100, 50), Size::new(800, 600)));
    assert!(wm.begin_resize(&id, ResizeDirection::SouthEast, Point::new(900, 650)));
    for step in 0..50 {
        wm.pointer_moved(Point::new(900 - step * 100, 650 - step * 100));
    }
    wm.pointer_released();
    let geometry = wm.get(&id).unwrap().geometry();
    assert!(geometry.size.width >= 300);
    assert!(geometry.size.height >= 200);
}

#[test]
fn west_resize_stalls_with_fixed_edge() {
    // start {position:{x:100,y:100}, size:{width:400,height:300}}, drag
    // the west handle right by 200: candidate 200 < 300, so both width
    // and x stay untouched
    let mut wm = manager();
    let id = wm.open(request("a", Point::new(100, 100), Size::new(400, 300)));
    assert!(wm.begin_resize(&id, ResizeDirection::West, Point::new(100, 250)));
    wm.pointer_moved(Point::new(300, 250));
    wm.pointer_released();
    let geometry = wm.get(&id).unwrap().geometry();
    assert_eq!(geometry.size.width, 400);
    assert_eq!(geometry.origin.x, 100);
}

#[test]
fn maximize_pairs_are_idempotent() {
    let mut wm = manager();
    let id = wm.open(request("a", Point::new(140, 90), Size::new(640, 480)));
    let before = *wm.get(&id).unwrap().geometry();
    wm.toggle_maximize(&id);
    wm.toggle_maximize(&id);
    assert_eq!(*wm.get(&id).unwrap().geometry(), before);
    assert!(!wm.get(&id).unwrap().maximized());
}

#[test]
fn close_then_focus_is_a_no_op() {
    let mut wm = manager();
    let a = wm.open(request("a", Point::new(0, 0), Size::new(400, 300)));
    let b = wm.open(request("b", Point::new(50, 50), Size::new(400, 300)));
    wm.focus(&a);
    wm.close(&b);
    // focusing the dead id leaves focus where it was
    wm.focus(&b);
    assert_eq!(wm.focused(), Some(&a));

    // and closing the focused window leaves nothing focused
    wm.close(&a);
    wm.focus(&a);
    assert_eq!(wm.focused(), None);
}

#[test]
fn drag_then_corner_resize_scenario() {
    let mut wm = manager();
    let id = wm.open(request("a", Point::new(100, 50), Size::new(800, 600)));

    // drag the title bar by (50, -20)
    assert!(wm.begin_drag(&id, Point::new(400, 60)));
    wm.pointer_moved(Point::new(450, 40));
    wm.pointer_released();
    {
        let geometry = wm.get(&id).unwrap().geometry();
        assert_eq!(geometry.origin, Point::new(150, 30));
        assert_eq!(geometry.size, Size::new(800, 600));
    }

    // then resize from the south-east handle by (-600, -500)
    assert!(wm.begin_resize(&id, ResizeDirection::SouthEast, Point::new(950, 630)));
    wm.pointer_moved(Point::new(350, 130));
    wm.pointer_released();
    let geometry = wm.get(&id).unwrap().geometry();
    assert_eq!(geometry.size, Size::new(300, 200));
    assert_eq!(geometry.origin, Point::new(150, 30));
}

#[test]
fn focus_ordering_matches_click_history() {
    let mut wm = manager();
    let a = wm.open(request("a", Point::new(0, 30), Size::new(400, 300)));
    let b = wm.open(request("b", Point::new(200, 90), Size::new(400, 300)));

    // most-recent open wins
    assert_eq!(wm.focused(), Some(&b));
    let order: Vec<&WindowId> = wm.draw_order().iter().map(|w| w.id()).collect();
    assert_eq!(order, vec![&a, &b]);

    // a title-bar press focuses and raises the window
    assert!(wm.begin_drag(&a, Point::new(10, 40)));
    wm.pointer_released();
    assert_eq!(wm.focused(), Some(&a));
    let order: Vec<&WindowId> = wm.draw_order().iter().map(|w| w.id()).collect();
    assert_eq!(order, vec![&b, &a]);
    assert!(wm.contains(&b));
}

#[test]
fn dragging_off_screen_is_not_clamped() {
    let mut wm = manager();
    let id = wm.open(request("a", Point::new(100, 50), Size::new(800, 600)));
    assert!(wm.begin_drag(&id, Point::new(400, 60)));
    wm.pointer_moved(Point::new(-2000, -2000));
    wm.pointer_released();
    let geometry = wm.get(&id).unwrap().geometry();
    assert!(geometry.origin.x < -1000);
    assert!(geometry.origin.y < -1000);
    assert_eq!(geometry.size, Size::new(800, 600));
}
