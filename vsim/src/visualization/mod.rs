pub mod vsim_vis3d;
