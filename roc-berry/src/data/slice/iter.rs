use crate::Idx3d;

/// x → y → z 顺序的体素索引迭代器, z 变化最快.
///
/// 顺序与 `itertools::iproduct!(0..x, 0..y, 0..z)` 相同.
#[derive(Debug, Clone)]
pub struct PosIter {
    cur: Idx3d,
    shape: Idx3d,
    done: bool,
}

impl PosIter {
    /// 迭代形状为 `shape` 的所有索引.
    #[inline]
    pub fn new(shape: Idx3d) -> Self {
        let (x, y, z) = shape;
        Self {
            cur: (0, 0, 0),
            shape,
            done: x == 0 || y == 0 || z == 0,
        }
    }
}

impl Iterator for PosIter {
    type Item = Idx3d;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let ret_pos = self.cur;
        let (x, y, z) = &mut self.cur;
        let (_, h, d) = self.shape;
        *z += 1;
        if *z == d {
            *z = 0;
            *y += 1;
            if *y == h {
                *y = 0;
                *x += 1;
                self.done = *x == self.shape.0;
            }
        }
        Some(ret_pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len();
        (n, Some(n))
    }
}

impl ExactSizeIterator for PosIter {
    fn len(&self) -> usize {
        if self.done {
            return 0;
        }
        let (x, y, z) = self.cur;
        let (_, h, d) = self.shape;
        let total = self.shape.0 * h * d;
        total - (x * h * d + y * d + z)
    }
}
