use wardpath_core::Cell;

/// Push the 4-directional neighbors of `c` into `buf`, keeping only those
/// for which `keep` returns `true`.
///
/// Order is fixed: right (+col), down (+row), left (−col), up (−row). A*
/// relies on it to pick the same path among equal-length alternatives.
pub fn cardinal(c: Cell, keep: impl Fn(Cell) -> bool, buf: &mut Vec<Cell>) {
    for n in c.neighbors_4() {
        if keep(n) {
            buf.push(n);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_and_keeps_order() {
        let mut buf = Vec::new();
        cardinal(Cell::new(0, 0), |n| n.row >= 0 && n.col >= 0, &mut buf);
        assert_eq!(buf, vec![Cell::new(0, 1), Cell::new(1, 0)]);
    }
}
