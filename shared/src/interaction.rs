/// Pointer movement (in pixels) per degree of rotation.
pub const DEFAULT_DRAG_SENSITIVITY: f64 = 3.0;

/// Accumulated rotation in degrees. Never wrapped or clamped.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    pub x: f64,
    pub y: f64,
}

impl Rotation {
    pub fn apply_movement(&mut self, dx: f64, dy: f64, sensitivity: f64) {
        self.x += dx / sensitivity;
        self.y += dy / sensitivity;
    }

    /// `[lambda, phi]` for the projection; no roll axis.
    pub fn as_angles(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
}

/// Two-state drag machine: pointer-down starts dragging, pointer-up ends it.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    phase: DragPhase,
}

impl DragSession {
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    pub fn pointer_down(&mut self) {
        self.phase = DragPhase::Dragging;
    }

    pub fn pointer_up(&mut self) {
        self.phase = DragPhase::Idle;
    }

    /// Fold a pointer-move delta into `rotation` while dragging.
    /// Returns whether the rotation changed.
    pub fn pointer_move(
        &self,
        rotation: &mut Rotation,
        dx: f64,
        dy: f64,
        sensitivity: f64,
    ) -> bool {
        if !self.is_dragging() {
            return false;
        }
        rotation.apply_movement(dx, dy, sensitivity);
        true
    }
}
