//! Transient vertex storage with ring/discard discipline.
//!
//! Vertices are staged into a fixed-capacity ring each flush. The write
//! cursor only moves forward; when a reservation does not fit in the space
//! left, the cursor wraps to zero and the storage generation changes. The
//! region handed out after a wrap is flagged `discard`, telling the device to
//! orphan whatever it may still be reading and start from fresh storage.
//! Within one generation reserved ranges never overlap.
//!
//! ```ignore
//! use strata_render::CircularVertexBuffer;
//!
//! let mut ring = CircularVertexBuffer::<TexturedVertex>::new(4096);
//!
//! if let Some(mut region) = ring.reserve(vertices.len()) {
//!     region.vertices_mut().copy_from_slice(&vertices);
//!     device.draw_triangles(region.range(), region.vertices());
//! }
//! ```

use bytemuck::Pod;
use strata_core::profiling::profile_function;
use strata_test_utils::StagedRange;

/// A region reserved from a [`CircularVertexBuffer`].
pub struct TransientRegion<'a, V> {
    vertices: &'a mut [V],
    range: StagedRange,
}

impl<V: Pod> TransientRegion<'_, V> {
    /// Where this region lives in the device's storage.
    pub fn range(&self) -> StagedRange {
        self.range
    }

    pub fn vertices(&self) -> &[V] {
        self.vertices
    }

    pub fn vertices_mut(&mut self) -> &mut [V] {
        self.vertices
    }

    /// Copy `data` into the region.
    ///
    /// # Panics
    ///
    /// Panics if `data` is not exactly the size of the region.
    pub fn write(&mut self, data: &[V]) {
        assert_eq!(
            data.len(),
            self.vertices.len(),
            "Data length {} does not match region length {}",
            data.len(),
            self.vertices.len()
        );
        self.vertices.copy_from_slice(data);
    }
}

/// A ring of vertex storage reused across frames.
///
/// Storage is allocated on first use (or by [`allocate`](Self::allocate)) and
/// kept until [`release`](Self::release).
pub struct CircularVertexBuffer<V> {
    /// Backing storage, empty while released
    storage: Vec<V>,
    /// Capacity in vertices
    capacity: usize,
    /// Next free vertex
    cursor: usize,
    /// Bumped on every wrap, allocation and release
    generation: u64,
    /// The next reservation must tell the device to discard
    pending_discard: bool,
    /// Number of wraps since creation
    wraps: u64,
}

impl<V: Pod> CircularVertexBuffer<V> {
    /// Create a ring holding up to `capacity` vertices. Nothing is allocated yet.
    pub fn new(capacity: usize) -> Self {
        Self {
            storage: Vec::new(),
            capacity,
            cursor: 0,
            generation: 0,
            pending_discard: true,
            wraps: 0,
        }
    }

    /// Allocate the backing storage if it is not already allocated.
    pub fn allocate(&mut self) {
        if self.is_allocated() || self.capacity == 0 {
            return;
        }
        self.storage = vec![V::zeroed(); self.capacity];
        self.cursor = 0;
        self.generation += 1;
        self.pending_discard = true;
        tracing::debug!(
            capacity = self.capacity,
            bytes = self.reserved_bytes(),
            "Allocated transient vertex storage"
        );
    }

    /// Free the backing storage. The next reservation reallocates and discards.
    pub fn release(&mut self) {
        if self.is_allocated() {
            tracing::debug!(bytes = self.reserved_bytes(), "Released transient vertex storage");
        }
        self.storage = Vec::new();
        self.cursor = 0;
        self.generation += 1;
        self.pending_discard = true;
    }

    /// Reserve `count` contiguous vertices.
    ///
    /// Wraps to the start of the storage (and flags the region `discard`) if
    /// the space left is too small. Returns `None` when `count` exceeds the
    /// whole capacity; the caller has to split the request.
    pub fn reserve(&mut self, count: usize) -> Option<TransientRegion<'_, V>> {
        profile_function!();
        if count > self.capacity {
            return None;
        }
        self.allocate();

        let mut discard = std::mem::take(&mut self.pending_discard);
        if self.cursor + count > self.capacity {
            self.cursor = 0;
            self.generation += 1;
            self.wraps += 1;
            discard = true;
            tracing::debug!(
                generation = self.generation,
                requested = count,
                "Transient vertex storage wrapped"
            );
        }

        let first = self.cursor;
        self.cursor += count;

        Some(TransientRegion {
            vertices: &mut self.storage[first..first + count],
            range: StagedRange {
                generation: self.generation,
                first_vertex: first as u32,
                vertex_count: count as u32,
                discard,
            },
        })
    }

    pub fn is_allocated(&self) -> bool {
        !self.storage.is_empty()
    }

    /// Capacity in vertices.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Largest reservation that keeps whole triangles.
    pub fn max_triangle_run(&self) -> usize {
        self.capacity - self.capacity % 3
    }

    /// Vertices left before the next wrap.
    pub fn remaining(&self) -> usize {
        self.capacity - self.cursor
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of wraps since creation.
    pub fn wraps(&self) -> u64 {
        self.wraps
    }

    /// Bytes currently held by the backing storage.
    pub fn reserved_bytes(&self) -> usize {
        self.storage.capacity() * std::mem::size_of::<V>()
    }
}
