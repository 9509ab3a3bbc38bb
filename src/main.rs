fn main() {
    goal_range::game::run();
}
