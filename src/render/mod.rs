pub mod presenter;
pub mod renderer;
pub mod sound;

pub use presenter::TerminalPresenter;
pub use renderer::Renderer;
pub use sound::{Chime, SoundCue};
