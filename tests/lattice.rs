use vptree::{Euclidean, VpTree};

#[derive(Debug)]
struct Point {
    x: f32,
    y: f32,
}

impl Point {
    fn new(x: f32, y: f32) -> Self {
        Point { x: x, y: y }
    }
}

fn distance(p: &Point, q: &Point) -> f32 {
    let dx = p.x - q.x;
    let dy = p.y - q.y;
    (dx * dx + dy * dy).sqrt()
}

#[test]
fn point_check() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(1.0, 0.0);

    assert_eq!(distance(&a, &b), 1.0);
}

fn lattice_points(n: usize) -> Vec<Point> {
    (0..n)
        .flat_map(|i| (0..n).map(move |j| Point::new(i as f32, j as f32)))
        .collect()
}

#[test]
fn lattice_vpn() {
    let points: Vec<Point> = lattice_points(20);

    let tree = VpTree::with_seed(points, distance, 20).unwrap();

    let x = tree.nearest_neighbor(&Point::new(4.1, 4.0)).unwrap().unwrap();
    assert_eq!(x.x, 4.0);
    assert_eq!(x.y, 4.0);

    let (ps, stats) = tree.search_with_stats(&Point::new(4.46, 4.4), 4).unwrap();
    println!("nodes traversed: {}", stats.visited);
    assert_eq!(ps.len(), 4);
    assert_eq!(ps[0].x, 4.0);
    assert_eq!(ps[0].y, 4.0);

    assert_eq!(ps[1].x, 5.0);
    assert_eq!(ps[1].y, 4.0);

    assert_eq!(ps[2].x, 4.0);
    assert_eq!(ps[2].y, 5.0);

    assert_eq!(ps[3].x, 5.0);
    assert_eq!(ps[3].y, 5.0);

    // lattice position (i, j) was inserted at i * 20 + j
    let indices: Vec<usize> = ps.iter().map(|p| p.index).collect();
    assert_eq!(indices, vec![84, 104, 85, 105]);
    assert!(stats.visited < 400);
}

#[test]
fn lattice_arrays() {
    let points: Vec<[f64; 2]> = (0..10)
        .flat_map(|i| (0..10).map(move |j| [i as f64, j as f64]))
        .collect();
    let tree = VpTree::with_seed(points, Euclidean, 3).unwrap();

    let found = tree.search(&[2.0, 7.0], 5).unwrap();
    assert_eq!(found[0].index, 27);
    assert_eq!(found[0].distance, 0.0);

    // the four axis neighbors, in any order
    let mut ring: Vec<usize> = found[1..].iter().map(|n| n.index).collect();
    ring.sort();
    assert_eq!(ring, vec![17, 26, 28, 37]);
    assert!(found[1..].iter().all(|n| n.distance == 1.0));
}
