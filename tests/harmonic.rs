use vptree::{ItemMetric, MetricItem, VpTree};

#[derive(Debug, PartialEq, Clone)]
struct Point(f32);

impl MetricItem for Point {
    type Distance = f32;

    fn distance(&self, a: &Self) -> f32 {
        (self.0 - a.0).abs()
    }
}

fn check_self_nearest(points: &[Point], seed: u64) {
    let vp = VpTree::with_seed(points.iter().cloned(), ItemMetric, seed).unwrap();
    assert_eq!(vp.len(), points.len());

    for (i, p) in points.iter().enumerate() {
        // each point should be nearest to itself.
        let nearest = vp.nearest_neighbor(p).unwrap().unwrap();
        if nearest.index != i {
            print!("\n{}", vp.dump());
        }
        assert_eq!(nearest.index, i);
        assert_eq!(*nearest, *p);
        assert_eq!(nearest.distance, 0.0);
    }
}

#[test]
fn test_linear() {
    for n in 10..101 {
        let points: Vec<_> = (0..n + 1).map(|x| Point(x as f32 / n as f32)).collect();
        check_self_nearest(&points, n as u64);
    }
}

#[test]
fn test_harmonic() {
    for n in 10..101 {
        let points: Vec<_> = (1..n + 1).map(|x| Point(1.0 / (x as f32))).collect();
        check_self_nearest(&points, n as u64);
    }
}

#[test]
fn test_harmonic_neighbors_ordered() {
    let points: Vec<_> = (1..201).map(|x| Point(1.0 / (x as f32))).collect();
    let vp = VpTree::new(points.clone(), ItemMetric).unwrap();

    // near zero the harmonic points crowd together, so the nearest ones
    // are the tail of the sequence.
    let found = vp.search(&Point(0.0), 5).unwrap();
    let indices: Vec<usize> = found.iter().map(|n| n.index).collect();
    assert_eq!(indices, vec![199, 198, 197, 196, 195]);
    assert!(found.windows(2).all(|w| w[0].distance <= w[1].distance));
}
