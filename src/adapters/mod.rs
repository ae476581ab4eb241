//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter         | Implements   | Connects to                   |
//! |-----------------|--------------|-------------------------------|
//! | `gpio_sink`     | OutputPort   | Single GPIO line (active LOW) |
//! | `relay_board`   | OutputPort   | I²C relay board register      |
//! | `output`        | OutputPort   | Whichever of the two is configured |
//! | `host_shutdown` | ShutdownPort | `shutdown -h now`             |
//! | `log_sink`      | EventSink    | `log` facade                  |
//! | `sacn_source`   | FrameSource  | E1.31 receiver (`e131`)       |
//! | `rpi`           | EdgeInput    | Raspberry Pi GPIO / I²C (`rpi`) |

pub mod gpio_sink;
pub mod host_shutdown;
pub mod log_sink;
pub mod output;
pub mod relay_board;

#[cfg(feature = "rpi")]
pub mod rpi;
#[cfg(feature = "e131")]
pub mod sacn_source;
