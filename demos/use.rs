use avl_explorer::{AvlTreeSet, Session};

fn main() {
    let mut set = AvlTreeSet::new();
    for x in [15, 10, 20, 8, 12, 17, 25] {
        set.insert(x);
    }
    assert!(!set.insert(10));
    assert!(set.contains(&12));
    set.remove(&12);
    assert!(!set.contains(&12));
    assert!(!set.remove(&12));

    println!("in order: {:?}", set.in_order());
    println!("size: {}, height: {}", set.len(), set.height());

    let mut session = Session::<i32>::new();
    session.populate_from_text("1,2,3,4,5").unwrap();
    if let Err(err) = session.insert(3) {
        println!("{err}");
    }
    session.search(&4).unwrap();
    println!("highlighted: {:?}", session.highlighted());
}
