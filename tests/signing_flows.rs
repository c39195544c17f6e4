use dogecoin_tx::address::{Address, AddressKind};
use dogecoin_tx::api;
use dogecoin_tx::messages::Tx;
use dogecoin_tx::network::Network;
use dogecoin_tx::transaction::assembler::SigningState;
use dogecoin_tx::transaction::{p2pkh, p2sh};
use dogecoin_tx::util::{Error, Result};
use pretty_assertions::assert_eq;
use rand::Rng;

const T: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_key() -> String {
    hex::encode(rand::thread_rng().gen::<[u8; 32]>())
}

#[test]
fn p2pkh_end_to_end() -> Result<()> {
    init();
    let k = random_key();
    let p = api::derive_pubkey(&k)?;
    let a = api::generate_address(&p, "mainnet")?;
    let lock = Address::decode(&a)?.script_pubkey();

    let tx = api::generate_base_tx(T, 0)?;
    let tx = api::add_output(&tx, &a, 5_000_000_000)?;
    let hash = api::generate_sighash(&tx, T, 0, 0, &lock.to_hex())?;
    assert_eq!(hash, api::generate_sighash(&tx, T, 0, 0, &p)?);
    let s = api::generate_signature(&hash, &k)?;
    let signed = api::build_tx(&tx, &s, T, 0, 0, &lock.to_hex())?;

    let tx = Tx::from_hex(&signed)?;
    assert_eq!(tx.inputs.len(), 1);
    let (sig, pubkey) = p2pkh::parse_unlock_script(&tx.inputs[0].unlock_script)?;
    assert_eq!(hex::encode(&sig[..sig.len() - 1]), s);
    assert_eq!(hex::encode(pubkey), p);
    assert_eq!(tx.outputs.len(), 1);
    assert_eq!(tx.outputs[0].amount, 5_000_000_000);
    assert_eq!(tx.outputs[0].lock_script, lock);
    Ok(())
}

#[test]
fn multisig_two_of_three() -> Result<()> {
    init();
    let keys: Vec<String> = (0..3).map(|_| random_key()).collect();
    let pubkeys = keys.iter().map(|k| api::derive_pubkey(k)).collect::<Result<Vec<_>>>()?;
    let redeem = api::generate_redeem_script(&pubkeys.concat(), 2)?;
    let multisig = api::generate_multisig_address(&redeem, "testnet")?;
    let decoded = Address::decode(&multisig)?;
    assert_eq!((decoded.network, decoded.kind), (Network::Testnet, AddressKind::P2SH));

    let payee = api::generate_address(&pubkeys[0], "testnet")?;
    let tx = api::build_raw_tx(&[T, T], &[0, 1], &[&payee], &[100_000_000])?;
    let hash = api::generate_sighash(&tx, T, 1, 1, &redeem)?;
    let sig_c = api::generate_signature(&hash, &keys[2])?;
    let sig_a = api::generate_signature(&hash, &keys[0])?;
    let sig_b = api::generate_signature(&hash, &keys[1])?;

    assert_eq!(api::signing_state(&tx, T, 1, 1, &redeem)?, SigningState::Unsigned);
    let partial = api::build_tx(&tx, &sig_c, T, 1, 1, &redeem)?;
    assert_eq!(api::signing_state(&partial, T, 1, 1, &redeem)?, SigningState::PartiallySigned { have: 1, need: 2 });
    let full = api::build_tx(&partial, &sig_a, T, 1, 1, &redeem)?;
    assert_eq!(api::signing_state(&full, T, 1, 1, &redeem)?, SigningState::FullySigned);
    assert!(matches!(api::build_tx(&full, &sig_b, T, 1, 1, &redeem), Err(Error::AlreadyFullySigned(_))));

    let tx = Tx::from_hex(&full)?;
    assert!(tx.inputs[0].unlock_script.0.is_empty());
    let (sigs, placed_redeem) = p2sh::parse_unlock_script(&tx.inputs[1].unlock_script)?;
    assert_eq!(sigs.iter().map(hex::encode).collect::<Vec<_>>(), vec![sig_a, sig_c]);
    assert_eq!(placed_redeem.to_hex(), redeem);
    Ok(())
}

#[test]
fn signing_after_mutation_is_rejected() -> Result<()> {
    init();
    let k = random_key();
    let p = api::derive_pubkey(&k)?;
    let a = api::generate_address(&p, "mainnet")?;
    let tx = api::add_output(&api::generate_base_tx(T, 0)?, &a, 1_000)?;
    let s = api::generate_signature(&api::generate_sighash(&tx, T, 0, 0, &p)?, &k)?;
    let mutated = api::add_input(&tx, T, 5)?;
    assert!(matches!(api::build_tx(&mutated, &s, T, 0, 0, &p), Err(Error::InvalidSignature(_))));
    assert!(api::build_tx(&tx, &s, T, 0, 0, &p).is_ok());
    Ok(())
}

#[test]
fn inputs_signed_independently() -> Result<()> {
    init();
    let k1 = random_key();
    let k2 = random_key();
    let p1 = api::derive_pubkey(&k1)?;
    let p2 = api::derive_pubkey(&k2)?;
    let a = api::generate_address(&p1, "mainnet")?;
    let tx = api::build_raw_tx(&[T, T], &[0, 1], &[&a], &[42])?;

    let s1 = api::generate_signature(&api::generate_sighash(&tx, T, 0, 0, &p1)?, &k1)?;
    let s2 = api::generate_signature(&api::generate_sighash(&tx, T, 1, 0, &p2)?, &k2)?;
    let signed = api::build_tx(&api::build_tx(&tx, &s1, T, 0, 0, &p1)?, &s2, T, 1, 0, &p2)?;

    let tx = Tx::from_hex(&signed)?;
    assert!(!tx.inputs[0].unlock_script.0.is_empty());
    assert!(!tx.inputs[1].unlock_script.0.is_empty());
    assert_eq!(Tx::from_hex(&tx.to_hex())?, tx);
    Ok(())
}
