// Components module - the panels the TUI is drawn from
//
// - Employee list: selector options, pick one with Enter
// - Posts panel: the main container, hidden comment panels left out
// - Logs panel: captured tracing output
// - Status bar: selection, counts, last fetch failure

pub mod employee_list;
pub mod logs_panel;
pub mod posts_panel;
pub mod scrollbar;
pub mod status_bar;
