//! Memory pools with bump allocation.
//!
//! Each pool owns a heap buffer. `allocate` hands out the next `size` bytes
//! of the first pool with room left. `free` only bumps the pool's
//! `free_blocks` counter; the bytes are never handed out again.

use crate::{ByteAddr, HwError, Platform};
use serde::Serialize;

#[derive(Debug)]
pub struct MemoryPool {
    buffer: Box<[u8]>,
    base: ByteAddr,
    allocated: usize,
    free_blocks: i64,
}

impl MemoryPool {
    /// Returns `None` when the allocator cannot provide `size` bytes.
    fn obtain(size: usize) -> Option<Self> {
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(size).ok()?;
        buffer.resize(size, 0);
        let buffer = buffer.into_boxed_slice();
        Some(Self {
            base: ByteAddr::of(buffer.as_ptr()),
            buffer,
            allocated: 0,
            free_blocks: 1,
        })
    }

    pub fn base(&self) -> ByteAddr {
        self.base
    }

    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    pub fn allocated(&self) -> usize {
        self.allocated
    }

    pub fn free_blocks(&self) -> i64 {
        self.free_blocks
    }

    pub fn remaining(&self) -> usize {
        self.size() - self.allocated
    }

    pub fn contains(&self, addr: ByteAddr) -> bool {
        addr >= self.base && addr < self.base + self.size()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    pub index: usize,
    pub base: ByteAddr,
    pub size: usize,
    pub allocated: usize,
    pub free_blocks: i64,
}

/// The fixed table of pool slots.
#[derive(Debug)]
pub struct MemoryPools {
    pools: Vec<MemoryPool>,
    max_pools: usize,
}

impl MemoryPools {
    /// An empty table with `max_pools` slots.
    pub fn new(max_pools: usize) -> Self {
        Self {
            pools: Vec::new(),
            max_pools,
        }
    }

    /// Sets up the main pool followed by the DMA pool.
    pub fn setup(platform: &Platform) -> Result<Self, HwError> {
        tracing::info!("Setting up memory management...");
        let mut pools = Self::new(platform.max_memory_pools);

        pools
            .add_pool(platform.main_memory_size, HwError::MainPool)
            .inspect_err(|_| tracing::error!("Failed to allocate main memory pool"))?;

        if let Err(e) = pools.setup_dma(platform.dma_memory_size) {
            pools.cleanup();
            return Err(HwError::DmaSetup(Box::new(e)));
        }

        tracing::info!("Memory setup completed successfully");
        Ok(pools)
    }

    /// Appends a pool of `size` bytes for DMA.
    pub fn setup_dma(&mut self, size: usize) -> Result<(), HwError> {
        self.add_pool(size, HwError::DmaPool)
    }

    fn add_pool(
        &mut self,
        size: usize,
        unavailable: fn(usize) -> HwError,
    ) -> Result<(), HwError> {
        if self.pools.len() >= self.max_pools {
            return Err(HwError::PoolSlotsExhausted(self.max_pools));
        }
        let pool = MemoryPool::obtain(size).ok_or_else(|| unavailable(size))?;
        tracing::debug!(
            "pool {} at {} with {size} bytes",
            self.pools.len(),
            pool.base()
        );
        self.pools.push(pool);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    pub fn pools(&self) -> &[MemoryPool] {
        &self.pools
    }

    /// First-fit bump allocation. Zero-sized requests get `None`.
    pub fn allocate(&mut self, size: usize) -> Option<ByteAddr> {
        if size == 0 {
            return None;
        }
        let Some(pool) = self.pools.iter_mut().find(|p| p.remaining() >= size) else {
            tracing::warn!("Memory allocation failed for size {size}");
            return None;
        };
        let addr = pool.base + pool.allocated;
        pool.allocated += size;
        pool.free_blocks -= 1;
        Some(addr)
    }

    /// Marks `addr` as freed in its pool. Returns `false` for `None` and for
    /// addresses no pool owns.
    pub fn free(&mut self, addr: Option<ByteAddr>) -> bool {
        let Some(addr) = addr else {
            return false;
        };
        match self.pools.iter_mut().find(|p| p.contains(addr)) {
            Some(pool) => {
                pool.free_blocks += 1;
                true
            }
            None => {
                tracing::warn!("Attempted to free invalid pointer {addr}");
                false
            }
        }
    }

    /// Index of the pool owning `addr`.
    pub fn pool_of(&self, addr: ByteAddr) -> Option<usize> {
        self.pools.iter().position(|p| p.contains(addr))
    }

    /// Borrows `len` already allocated bytes starting at `addr`.
    pub fn bytes_mut(&mut self, addr: ByteAddr, len: usize) -> Option<&mut [u8]> {
        let pool = self.pools.iter_mut().find(|p| p.contains(addr))?;
        let offset = addr - pool.base;
        let end = offset.checked_add(len)?;
        if end > pool.allocated {
            return None;
        }
        Some(&mut pool.buffer[offset..end])
    }

    /// Releases every pool.
    pub fn cleanup(&mut self) {
        tracing::info!("Cleaning up memory pools...");
        self.pools.clear();
        tracing::info!("Memory cleanup completed");
    }

    pub fn stats(&self) -> Vec<PoolStats> {
        self.pools
            .iter()
            .enumerate()
            .map(|(index, p)| PoolStats {
                index,
                base: p.base,
                size: p.size(),
                allocated: p.allocated,
                free_blocks: p.free_blocks,
            })
            .collect()
    }

    pub fn print_stats(&self) {
        tracing::info!("Memory Pool Statistics:");
        for s in self.stats() {
            tracing::info!(
                "Pool {}: Size={}, Allocated={}, Free Blocks={}",
                s.index,
                s.size,
                s.allocated,
                s.free_blocks
            );
        }
    }
}
