//! Groups a frame's draw commands into instanced draws.
//!
//! Commands are ordered by render pass, then by mesh. The sort is stable, so
//! within a group the scene's submission order is preserved; blended passes
//! rely on that.

use std::ops::Range;

use orrery_mesh::SubdivisionLevel;
use orrery_scene::{DrawCommand, RenderPassKind};

use crate::body_pipeline::BodyInstance;

/// A run of instances sharing a pass and a mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawGroup {
    pub pass: RenderPassKind,
    pub mesh: SubdivisionLevel,
    /// Slice of the instance buffer to draw.
    pub instances: Range<u32>,
}

impl DrawGroup {
    pub fn instance_count(&self) -> u32 {
        self.instances.end - self.instances.start
    }
}

#[derive(Debug, Default)]
pub struct DrawBatch {
    commands: Vec<DrawCommand>,
    sorted: bool,
}

impl DrawBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
            sorted: false,
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
        self.sorted = false;
    }

    pub fn extend(&mut self, commands: impl IntoIterator<Item = DrawCommand>) {
        self.commands.extend(commands);
        self.sorted = false;
    }

    /// Stable sort by pass, then mesh.
    pub fn sort(&mut self) {
        self.commands.sort_by_key(|c| (c.pass, c.mesh));
        self.sorted = true;
    }

    /// Keep the allocation for next frame.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.sorted = false;
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// True after [`sort`](Self::sort) until the next push; batches of zero
    /// or one command are always sorted.
    pub fn is_sorted(&self) -> bool {
        self.sorted || self.commands.len() <= 1
    }

    /// Per-instance GPU records in current command order.
    pub fn instances(&self) -> Vec<BodyInstance> {
        self.commands.iter().map(BodyInstance::from_command).collect()
    }

    /// Contiguous runs of equal (pass, mesh). Call [`sort`](Self::sort) first.
    pub fn groups(&self) -> impl Iterator<Item = DrawGroup> + '_ {
        debug_assert!(self.is_sorted(), "DrawBatch::groups called before sort");
        self.commands
            .chunk_by(|a, b| a.pass == b.pass && a.mesh == b.mesh)
            .scan(0u32, |start, run| {
                let end = *start + run.len() as u32;
                let group = DrawGroup {
                    pass: run[0].pass,
                    mesh: run[0].mesh,
                    instances: *start..end,
                };
                *start = end;
                Some(group)
            })
    }
}
