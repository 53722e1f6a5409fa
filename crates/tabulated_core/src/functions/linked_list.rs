//! Linked-list tabulated function.
//!
//! Samples live in a circular doubly-linked ring. Nodes are stored in an
//! arena owned by the function and addressed by index handles, so the
//! ring has no shared ownership and no reference cycles. `head` is the
//! minimum-x node and `head.prev` the maximum-x node, which makes both
//! bounds O(1).

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::traits::tabulated::{apply_or_nan, render, uniform_grid, validate_samples};
use crate::traits::{
    interpolate_linear, Insertable, MathFunction, Removable, TabulatedFunction, MIN_COUNT,
};
use crate::types::point::hash_bits;
use crate::types::{Point, TabulatedError};

/// Handle of a node slot in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeId(usize);

#[derive(Debug, Clone, Copy)]
struct Node {
    x: f64,
    y: f64,
    prev: NodeId,
    next: NodeId,
}

/// Tabulated function stored as a circular doubly-linked ring.
///
/// Index lookup walks from `head` forward when `index <= count / 2` and
/// backward through `prev` otherwise, so no access walks more than half the
/// ring.
///
/// # Example
///
/// ```
/// use tabulated_core::functions::LinkedListTabulatedFunction;
/// use tabulated_core::traits::{Insertable, TabulatedFunction};
///
/// let mut f = LinkedListTabulatedFunction::new(&[1.0, 3.0], &[10.0, 30.0]).unwrap();
/// f.insert(2.0, 20.0);
/// assert_eq!(f.count(), 3);
/// assert_eq!(f.index_of_x(2.0), Some(1));
/// assert_eq!(f.right_bound(), 3.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct LinkedListTabulatedFunction {
    /// Node arena; slots listed in `free` are unlinked
    nodes: Vec<Node>,
    /// Recyclable slots
    free: Vec<NodeId>,
    /// Minimum-x node
    head: NodeId,
    /// Number of linked nodes
    count: usize,
}

impl LinkedListTabulatedFunction {
    /// Construct from sample arrays.
    ///
    /// # Errors
    ///
    /// * `LengthMismatch` - arrays of different lengths
    /// * `InsufficientData` - fewer than two samples
    /// * `NotSorted` - x values decrease somewhere
    pub fn new(x_values: &[f64], y_values: &[f64]) -> Result<Self, TabulatedError> {
        validate_samples(x_values, y_values)?;
        Ok(Self::from_sorted(x_values, y_values))
    }

    /// Sample `source` at `count` evenly spaced points over `[from, to]`.
    ///
    /// Same grid rules as
    /// [`ArrayTabulatedFunction::from_function`](crate::functions::ArrayTabulatedFunction::from_function).
    pub fn from_function<S>(source: &S, from: f64, to: f64, count: usize) -> Result<Self, TabulatedError>
    where
        S: MathFunction + ?Sized,
    {
        let x_values = uniform_grid(from, to, count)?;
        let y_values: Vec<f64> = x_values.iter().map(|&x| source.apply(x)).collect();
        Ok(Self::from_sorted(&x_values, &y_values))
    }

    /// Build the ring from already validated samples.
    fn from_sorted(x_values: &[f64], y_values: &[f64]) -> Self {
        let count = x_values.len();
        let nodes = x_values
            .iter()
            .zip(y_values.iter())
            .enumerate()
            .map(|(i, (&x, &y))| Node {
                x,
                y,
                prev: NodeId((i + count - 1) % count),
                next: NodeId((i + 1) % count),
            })
            .collect();
        Self {
            nodes,
            free: Vec::new(),
            head: NodeId(0),
            count,
        }
    }

    #[inline]
    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    #[inline]
    fn tail(&self) -> NodeId {
        self.node(self.head).prev
    }

    /// Node at `index`; the caller guarantees `index < count`.
    fn node_at(&self, index: usize) -> NodeId {
        let mut id = self.head;
        if index <= self.count / 2 {
            for _ in 0..index {
                id = self.node(id).next;
            }
        } else {
            for _ in 0..self.count - index {
                id = self.node(id).prev;
            }
        }
        id
    }

    fn checked_node_at(&self, index: usize) -> Result<NodeId, TabulatedError> {
        if index >= self.count {
            return Err(TabulatedError::IndexOutOfBounds {
                index,
                count: self.count,
            });
        }
        Ok(self.node_at(index))
    }

    fn allocate(&mut self, x: f64, y: f64) -> NodeId {
        let node = Node {
            x,
            y,
            prev: NodeId(0),
            next: NodeId(0),
        };
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.0] = node;
                id
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    /// Link a new node between `pred` and its successor.
    fn splice_after(&mut self, pred: NodeId, x: f64, y: f64) -> NodeId {
        let id = self.allocate(x, y);
        let succ = self.node(pred).next;
        {
            let node = self.node_mut(id);
            node.prev = pred;
            node.next = succ;
        }
        self.node_mut(succ).prev = id;
        self.node_mut(pred).next = id;
        self.count += 1;
        id
    }

    /// Iterator over node handles in ring order from `head`.
    fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = self.head;
        (0..self.count).map(move |_| {
            let id = current;
            current = self.node(id).next;
            id
        })
    }
}

impl TryFrom<Vec<Point>> for LinkedListTabulatedFunction {
    type Error = TabulatedError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        let (x_values, y_values): (Vec<f64>, Vec<f64>) =
            points.into_iter().map(|p| (p.x, p.y)).unzip();
        Self::new(&x_values, &y_values)
    }
}

impl From<LinkedListTabulatedFunction> for Vec<Point> {
    fn from(function: LinkedListTabulatedFunction) -> Self {
        function.to_points()
    }
}

impl MathFunction for LinkedListTabulatedFunction {
    fn apply(&self, x: f64) -> f64 {
        apply_or_nan(self, x)
    }
}

impl TabulatedFunction for LinkedListTabulatedFunction {
    #[inline]
    fn count(&self) -> usize {
        self.count
    }

    fn get_x(&self, index: usize) -> Result<f64, TabulatedError> {
        let id = self.checked_node_at(index)?;
        Ok(self.node(id).x)
    }

    fn get_y(&self, index: usize) -> Result<f64, TabulatedError> {
        let id = self.checked_node_at(index)?;
        Ok(self.node(id).y)
    }

    fn set_y(&mut self, index: usize, value: f64) -> Result<(), TabulatedError> {
        let id = self.checked_node_at(index)?;
        self.node_mut(id).y = value;
        Ok(())
    }

    fn index_of_x(&self, x: f64) -> Option<usize> {
        self.ids().position(|id| self.node(id).x == x)
    }

    fn index_of_y(&self, y: f64) -> Option<usize> {
        self.ids().position(|id| self.node(id).y == y)
    }

    #[inline]
    fn left_bound(&self) -> f64 {
        self.node(self.head).x
    }

    #[inline]
    fn right_bound(&self) -> f64 {
        self.node(self.tail()).x
    }

    fn floor_index_of_x(&self, x: f64) -> Result<usize, TabulatedError> {
        if x < self.left_bound() {
            return Err(TabulatedError::Domain {
                x,
                left: self.left_bound(),
                right: self.right_bound(),
            });
        }
        if x >= self.right_bound() {
            return Ok(self.count - 1);
        }
        let mut current = self.head;
        let mut index = 0;
        // terminates before the tail because x < right_bound
        while x >= self.node(self.node(current).next).x {
            current = self.node(current).next;
            index += 1;
        }
        Ok(index)
    }

    fn extrapolate_left(&self, x: f64) -> f64 {
        let first = self.node(self.head);
        let second = self.node(first.next);
        interpolate_linear(x, first.x, second.x, first.y, second.y)
    }

    fn extrapolate_right(&self, x: f64) -> f64 {
        let last = self.node(self.tail());
        let before = self.node(last.prev);
        interpolate_linear(x, before.x, last.x, before.y, last.y)
    }

    fn interpolate(&self, x: f64, floor_index: usize) -> Result<f64, TabulatedError> {
        if floor_index + 1 >= self.count {
            return Err(TabulatedError::IndexOutOfBounds {
                index: floor_index,
                count: self.count,
            });
        }
        let left = self.node(self.node_at(floor_index));
        let right = self.node(left.next);
        if x < left.x || x > right.x {
            return Err(TabulatedError::Domain {
                x,
                left: left.x,
                right: right.x,
            });
        }
        Ok(interpolate_linear(x, left.x, right.x, left.y, right.y))
    }

    fn points(&self) -> Box<dyn Iterator<Item = Point> + '_> {
        Box::new(self.ids().map(|id| {
            let node = self.node(id);
            Point::new(node.x, node.y)
        }))
    }
}

impl Insertable for LinkedListTabulatedFunction {
    fn insert(&mut self, x: f64, y: f64) {
        if x < self.left_bound() {
            let tail = self.tail();
            self.head = self.splice_after(tail, x, y);
            trace!(x, y, count = self.count, "inserted new head");
            return;
        }
        let mut current = self.head;
        loop {
            if self.node(current).x == x {
                self.node_mut(current).y = y;
                trace!(x, y, "overwrote existing sample");
                return;
            }
            let next = self.node(current).next;
            if next == self.head || self.node(next).x > x {
                break;
            }
            current = next;
        }
        self.splice_after(current, x, y);
        trace!(x, y, count = self.count, "inserted sample");
    }
}

impl Removable for LinkedListTabulatedFunction {
    fn remove(&mut self, index: usize) -> Result<(), TabulatedError> {
        if self.count <= MIN_COUNT {
            return Err(TabulatedError::InsufficientData {
                got: self.count - 1,
                need: MIN_COUNT,
            });
        }
        let id = self.checked_node_at(index)?;
        let Node { prev, next, .. } = *self.node(id);
        self.node_mut(prev).next = next;
        self.node_mut(next).prev = prev;
        if id == self.head {
            self.head = next;
        }
        self.count -= 1;
        {
            let node = self.node_mut(id);
            node.prev = id;
            node.next = id;
        }
        self.free.push(id);
        trace!(index, count = self.count, "removed sample");
        Ok(())
    }
}

impl PartialEq for LinkedListTabulatedFunction {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count && self.points().eq(other.points())
    }
}

impl Hash for LinkedListTabulatedFunction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.count.hash(state);
        for point in self.points() {
            hash_bits(point.x).hash(state);
            hash_bits(point.y).hash(state);
        }
    }
}

impl fmt::Display for LinkedListTabulatedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self, "LinkedListTabulatedFunction", f)
    }
}
