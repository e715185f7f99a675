/*!

A CHIP-8 emulator as specified at https://en.wikipedia.org/wiki/CHIP-8,
with the SCHIP and XO-CHIP display extensions (hires mode, scrolling and drawing planes),
that draws straight into a terminal.

# Crossterm Frontend

If you want to try the emulator on some programs, there is a ready-to-use implementation
you can run by using `cargo run --release --bin crossterm_frontend -- <program>`.
The keypad is mapped onto the left side of the keyboard:

```text
1 2 3 C        1 2 3 4
4 5 6 D        Q W E R
7 8 9 E        A S D F
A 0 B F        Z X C V
```

Press escape to quit. Use `--quirks schip` or similar when a program expects another interpreter.

# Library

If you are not interested in handling input (key presses and such),
then you can use `Emulator::new()` to get an emulator to work with.

The main way of running a program is to load instructions as bytes.

```rust
use chip_8_term::emulator::{Emulator, Flow, quirks::Quirks};

let mut emulator = Emulator::new(Quirks::default());

// Load a program at address 0x200.
let program = [0x60, 0x05, 0x61, 0x0A, 0x80, 0x14];
emulator.load(&program).unwrap();
for _ in 0..3 {
    assert_eq!(emulator.step().unwrap(), Flow::Continue);
}
assert_eq!(emulator.register(0), 15);
```

Alternatively, you can experiment by executing instructions manually.

```rust
use chip_8_term::emulator::{Emulator, quirks::Quirks};
use chip_8_term::emulator::instruction::{Instruction, Reg, Const, Addr};

let mut emulator = Emulator::new(Quirks::default());

emulator.execute_single(Instruction::ClearScreen).unwrap();
emulator.execute_single(Instruction::Goto(Addr(0x250))).unwrap();
emulator.execute_single(Instruction::SetRegToConst(Reg(0xA), Const(35))).unwrap();
assert_eq!(emulator.program_counter(), 0x250);
```

## Custom input and output

To run a program in real time you need a `Driver`, which takes an `EmulatorInput`
and an `EmulatorOutput`, representing somewhere to get keyboard input from and a
grid of terminal cells respectively.
Take a look at `src/emulator/input.rs` and `src/emulator/output.rs` to see how to implement these, then do the following.

```ignore
use chip_8_term::emulator::{Config, Driver};

let mut driver = Driver::new(Config::default(), MyInput::new(), MyOutput::new(), &program)?;
let exit_code = driver.run()?;
```

The driver checks that the terminal is large enough before running anything, and again
whenever the program asks for hires mode.
*/

pub mod emulator;
pub mod util;
