//! Generic state machine (enter / exit / logic_update / physics_update).
//!
//! Машина владеет текущим состоянием и последовательностью переходов:
//! exit старого → замена → enter нового, атомарно внутри одного вызова.
//! Состояние может вернуть следующее из `logic_update`, машина его применит.

/// Capability set состояния над контекстом `C`
pub trait MachineState<C>: Sized {
    /// Имя для логов / диагностики
    fn name(&self) -> &'static str;

    fn enter(&mut self, _ctx: &mut C) {}

    fn exit(&mut self, _ctx: &mut C) {}

    /// Логический тик. `Some(next)` → переход.
    fn logic_update(&mut self, _ctx: &mut C) -> Option<Self> {
        None
    }

    fn physics_update(&mut self, _ctx: &mut C) {}

    /// Терминальное состояние: переходы из него отклоняются
    fn is_terminal(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone)]
pub struct StateMachine<S> {
    current: Option<S>,
    enter_count: u64,
    exit_count: u64,
}

impl<S> Default for StateMachine<S> {
    fn default() -> Self {
        Self {
            current: None,
            enter_count: 0,
            exit_count: 0,
        }
    }
}

impl<S> StateMachine<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&S> {
        self.current.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.current.is_some()
    }

    pub fn enter_count(&self) -> u64 {
        self.enter_count
    }

    pub fn exit_count(&self) -> u64 {
        self.exit_count
    }

    /// Установить начальное состояние и вызвать `enter`.
    ///
    /// На уже работающей машине идёт через `exit` текущего (как `change_state`).
    pub fn initialize<C>(&mut self, state: S, ctx: &mut C) -> bool
    where
        S: MachineState<C>,
    {
        if self.current.is_some() {
            return self.change_state(state, ctx);
        }
        self.enter(state, ctx);
        true
    }

    /// exit текущего → замена → enter нового.
    ///
    /// Возвращает false если текущее состояние терминальное.
    pub fn change_state<C>(&mut self, next: S, ctx: &mut C) -> bool
    where
        S: MachineState<C>,
    {
        let Some(mut previous) = self.current.take() else {
            self.enter(next, ctx);
            return true;
        };

        if previous.is_terminal() {
            crate::log(&format!(
                "FSM: refused {} → {} (terminal)",
                previous.name(),
                next.name()
            ));
            self.current = Some(previous);
            return false;
        }

        previous.exit(ctx);
        self.exit_count += 1;

        crate::log(&format!("FSM: {} → {}", previous.name(), next.name()));
        self.enter(next, ctx);
        true
    }

    /// Логический тик текущего состояния (+ применение возвращённого перехода)
    pub fn logic_update<C>(&mut self, ctx: &mut C)
    where
        S: MachineState<C>,
    {
        let next = match self.current.as_mut() {
            Some(state) => state.logic_update(ctx),
            None => return,
        };

        if let Some(next) = next {
            self.change_state(next, ctx);
        }
    }

    pub fn physics_update<C>(&mut self, ctx: &mut C)
    where
        S: MachineState<C>,
    {
        if let Some(state) = self.current.as_mut() {
            state.physics_update(ctx);
        }
    }

    fn enter<C>(&mut self, state: S, ctx: &mut C)
    where
        S: MachineState<C>,
    {
        let state = self.current.insert(state);
        self.enter_count += 1;
        state.enter(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Тестовое состояние: пишет enter/exit в журнал контекста
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Light {
        Red,
        Green { ticks: u32 },
        Broken,
    }

    #[derive(Default)]
    struct Journal {
        lines: Vec<String>,
    }

    impl MachineState<Journal> for Light {
        fn name(&self) -> &'static str {
            match self {
                Light::Red => "Red",
                Light::Green { .. } => "Green",
                Light::Broken => "Broken",
            }
        }

        fn enter(&mut self, ctx: &mut Journal) {
            ctx.lines.push(format!("enter {}", self.name()));
        }

        fn exit(&mut self, ctx: &mut Journal) {
            ctx.lines.push(format!("exit {}", self.name()));
        }

        fn logic_update(&mut self, _ctx: &mut Journal) -> Option<Self> {
            match self {
                Light::Green { ticks } => {
                    *ticks += 1;
                    (*ticks >= 2).then_some(Light::Red)
                }
                _ => None,
            }
        }

        fn is_terminal(&self) -> bool {
            matches!(self, Light::Broken)
        }
    }

    #[test]
    fn test_initialize_enters_once() {
        let mut machine = StateMachine::new();
        let mut journal = Journal::default();

        assert!(machine.initialize(Light::Red, &mut journal));

        assert_eq!(machine.current(), Some(&Light::Red));
        assert_eq!(journal.lines, vec!["enter Red"]);
        assert_eq!((machine.enter_count(), machine.exit_count()), (1, 0));
    }

    #[test]
    fn test_reinitialize_exits_running_state() {
        let mut machine = StateMachine::new();
        let mut journal = Journal::default();

        machine.initialize(Light::Red, &mut journal);
        machine.initialize(Light::Green { ticks: 0 }, &mut journal);

        assert_eq!(journal.lines, vec!["enter Red", "exit Red", "enter Green"]);
    }

    #[test]
    fn test_logic_update_applies_returned_state() {
        let mut machine = StateMachine::new();
        let mut journal = Journal::default();
        machine.initialize(Light::Green { ticks: 0 }, &mut journal);

        machine.logic_update(&mut journal);
        assert_eq!(machine.current(), Some(&Light::Green { ticks: 1 }));

        machine.logic_update(&mut journal);
        assert_eq!(machine.current(), Some(&Light::Red));
        assert_eq!(journal.lines, vec!["enter Green", "exit Green", "enter Red"]);
    }

    #[test]
    fn test_terminal_state_refuses_transitions() {
        let mut machine = StateMachine::new();
        let mut journal = Journal::default();
        machine.initialize(Light::Red, &mut journal);
        assert!(machine.change_state(Light::Broken, &mut journal));

        assert!(!machine.change_state(Light::Red, &mut journal));
        assert!(!machine.initialize(Light::Green { ticks: 0 }, &mut journal));

        assert_eq!(machine.current(), Some(&Light::Broken));
        assert_eq!(journal.lines.last().map(String::as_str), Some("enter Broken"));
    }

    #[test]
    fn test_exit_count_trails_enter_count_by_one() {
        let mut machine = StateMachine::new();
        let mut journal = Journal::default();
        machine.initialize(Light::Red, &mut journal);

        let sequence = [
            Light::Green { ticks: 0 },
            Light::Red,
            Light::Red,
            Light::Green { ticks: 5 },
            Light::Red,
        ];
        for state in sequence {
            machine.change_state(state, &mut journal);
            assert_eq!(machine.exit_count() + 1, machine.enter_count());
        }

        // Для каждого состояния: entries - exits ∈ {0, 1}
        for name in ["Red", "Green"] {
            let enters = journal.lines.iter().filter(|l| **l == format!("enter {name}")).count();
            let exits = journal.lines.iter().filter(|l| **l == format!("exit {name}")).count();
            assert!(enters - exits <= 1, "{name}: {enters} enters, {exits} exits");
        }
    }

    #[test]
    fn test_uninitialized_machine_is_inert() {
        let mut machine: StateMachine<Light> = StateMachine::new();
        let mut journal = Journal::default();

        machine.logic_update(&mut journal);
        machine.physics_update(&mut journal);

        assert!(!machine.is_initialized());
        assert!(journal.lines.is_empty());
    }
}
