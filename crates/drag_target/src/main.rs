fn main() {
    let variant = std::env::args().nth(1);
    drag_target::run(variant.as_deref());
}
