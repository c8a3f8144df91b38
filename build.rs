extern crate windows_exe_info;

fn main() {
    windows_exe_info::versioninfo::link_cargo_env();
}
