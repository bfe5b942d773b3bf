/*!
# Camera Sync

Core types for synchronizing a camera between a CAD host and a web viewer.

The two sides share neither memory, coordinate system nor projection model.
This crate converts between the host's view orientation and extents and a
host-independent camera state that travels through a relay.

## Architecture

- **CameraState**: Wire representation of a camera (lower camel case JSON)
- **HostDocument**: Trait for the CAD host's views, viewports and transactions
- **capture_view / restore_view**: Forward and reverse transforms
- **CameraExportContext**: Traversal callbacks exporting the active view
- **RestoreQueue**: Marshals restore requests onto the host's mutation thread
- **ViewerAdapter**: Viewer-side coordinate offset correction

Transport implementations (the relay and its HTTP client) live in
`camera_sync_relay` and plug in through `StateSink`.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod camera;
pub mod host;
pub mod transform;
pub mod export;
pub mod restore;
pub mod viewer;

// Main camera_sync namespace module
pub mod camera_sync {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging facade
    pub use crate::engine::SyncEngine;

    // Wire state
    pub use crate::camera::CameraState;

    // Logging sub-module (types only; macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Camera geometry sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Host collaborators sub-module
    pub mod host {
        pub use crate::host::*;
    }

    // Transform sub-module
    pub mod transform {
        pub use crate::transform::*;
    }

    // Export sub-module
    pub mod export {
        pub use crate::export::*;
    }

    // Restore sub-module
    pub mod restore {
        pub use crate::restore::*;
    }

    // Viewer sub-module
    pub mod viewer {
        pub use crate::viewer::*;
    }
}

// Re-export math library at crate root
pub use glam;
