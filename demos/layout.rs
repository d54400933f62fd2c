use avl_explorer::{layout, AvlTreeSet};

fn main() {
    let set: AvlTreeSet<i32> = (1..=7).collect();

    println!("Pre-order layout:");
    for node in layout::layout(&set).nodes() {
        println!(
            "{:>3} at ({:>6.2}, {:>4.1})  children: {:?} {:?}",
            node.value, node.position.x, node.position.y, node.left, node.right
        );
    }

    if let Some(root) = set.root() {
        println!("root {} has height {}", root.value(), root.height());
    }
}
