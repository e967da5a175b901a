const COMMANDS: &[&str] = &[
    "get_shared_file",
    "invoke_method",
    "attach_listener",
    "detach_listener",
];

fn main() {
    tauri_plugin::Builder::new(COMMANDS)
        .android_path("android")
        .build();
}
