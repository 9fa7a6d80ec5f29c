#![cfg(unix)]

use std::{
    io::{BufRead, BufReader, Read, Write},
    process::{Command, Stdio},
};

use pretty_assertions::assert_eq;
use reckon::shell::BANNER;

#[test]
fn interrupt_ends_a_piped_session_successfully() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_reckon")).stdin(Stdio::piped())
                                                              .stdout(Stdio::piped())
                                                              .stderr(Stdio::null())
                                                              .spawn()
                                                              .unwrap();
    let mut stdin = child.stdin.take().unwrap();
    let mut stdout = BufReader::new(child.stdout.take().unwrap());

    stdin.write_all(b"6 * 7\n").unwrap();
    stdin.flush().unwrap();

    let mut seen = Vec::new();
    for _ in 0..2 {
        let mut line = String::new();
        stdout.read_line(&mut line).unwrap();
        seen.push(line);
    }
    assert_eq!(seen, vec![format!("{BANNER}\n"), "> 42\n".to_string()]);

    // Wait for the next prompt so the signal lands while the read blocks.
    let mut prompt = [0; 2];
    stdout.read_exact(&mut prompt).unwrap();
    assert_eq!(&prompt, b"> ");

    let status = Command::new("kill").args(["-INT", &child.id().to_string()])
                                     .status()
                                     .unwrap();
    assert!(status.success());

    let mut rest = String::new();
    stdout.read_to_string(&mut rest).unwrap();
    assert_eq!(rest, "\n");
    assert!(child.wait().unwrap().success());
    drop(stdin);
}

#[test]
fn end_of_piped_input_ends_the_session() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_reckon")).stdin(Stdio::piped())
                                                              .stdout(Stdio::piped())
                                                              .stderr(Stdio::null())
                                                              .spawn()
                                                              .unwrap();
    child.stdin.take().unwrap().write_all(b"2 ** 10\n1 / 0\n").unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(),
               format!("{BANNER}\n> 1024\n> Error: division by zero\n> \n"));
}
