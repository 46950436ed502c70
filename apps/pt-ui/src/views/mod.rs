pub mod plot_canvas;
pub mod tree_panel;

pub use plot_canvas::PlotCanvas;
pub use tree_panel::TreePanel;
